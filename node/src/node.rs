//! The node facade — every operation a front end can call.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use rand::RngCore;

use vox_ledger::{TokenLedger, TokenRecord, UserDirectory};
use vox_poll::present::{present, present_final};
use vox_poll::{Poll, PollRegistry, PresentationKind, Tally, TieBreakKind, Vote, VoteTally};
use vox_store::{PollStore, StoreError, TokenStore, UserStore};
use vox_store_json::JsonEnv;
use vox_types::{PollId, PollKind, Timestamp, TokenId, Username};

use crate::directory::DirectoryService;
use crate::events::{EventBus, PollEvent};
use crate::session::SessionStore;
use crate::{NodeConfig, NodeError};

/// Composes the poll registry, vote tally, token ledger, user directory,
/// and event bus behind one transport-agnostic surface.
pub struct VoxNode {
    config: NodeConfig,
    registry: Arc<PollRegistry>,
    ledger: Arc<TokenLedger>,
    tally: VoteTally,
    directory: Arc<DirectoryService>,
    events: EventBus,
}

impl VoxNode {
    /// Open a node over the JSON store at `config.data_dir`.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        let env = JsonEnv::open(&config.data_dir).map_err(StoreError::from)?;
        let polls = env.poll_store() as Arc<dyn PollStore>;
        let tokens = env.token_store() as Arc<dyn TokenStore>;
        let users = env.user_store() as Arc<dyn UserStore>;
        Ok(Self::with_stores(config, polls, tokens, users))
    }

    /// Wire a node over explicit stores (used by tests with nullables).
    pub fn with_stores(
        config: NodeConfig,
        polls: Arc<dyn PollStore>,
        tokens: Arc<dyn TokenStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new());
        let directory = Arc::new(DirectoryService::new(Arc::clone(&users), sessions));
        let registry = Arc::new(PollRegistry::new(polls));
        let ledger = Arc::new(TokenLedger::new(
            tokens,
            users,
            Arc::clone(&directory) as Arc<dyn UserDirectory>,
        ));
        let tally = VoteTally::new(Arc::clone(&registry), Arc::clone(&ledger));
        let events = EventBus::new(config.event_queue_depth);
        Self {
            config,
            registry,
            ledger,
            tally,
            directory,
            events,
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    // ── Polls ───────────────────────────────────────────────────────────

    pub fn create_poll(
        &self,
        question: &str,
        options: &[String],
        duration_seconds: u64,
        kind: PollKind,
    ) -> Result<Poll, NodeError> {
        Ok(self
            .registry
            .create(question, options, duration_seconds, kind, Timestamp::now())?)
    }

    pub fn get_poll(&self, id: &PollId) -> Result<Poll, NodeError> {
        Ok(self.registry.get(id, Timestamp::now())?)
    }

    pub fn list_polls(&self, active_only: bool) -> Result<Vec<Poll>, NodeError> {
        Ok(self.registry.list(active_only, Timestamp::now())?)
    }

    /// Close a poll. Returns `false` if it was already closed; emits a
    /// [`PollEvent::PollClosed`] only on the actual transition.
    pub fn close_poll(&self, id: &PollId) -> Result<bool, NodeError> {
        let closed = self.registry.close(id)?;
        if closed {
            self.events.emit(&PollEvent::PollClosed { poll_id: *id });
        }
        Ok(closed)
    }

    // ── Votes & results ─────────────────────────────────────────────────

    pub fn vote(
        &self,
        poll_id: &PollId,
        voter: &Username,
        option: &str,
    ) -> Result<Vote, NodeError> {
        let vote = self.tally.accept(poll_id, voter, option, Timestamp::now())?;
        self.events.emit(&PollEvent::VoteAccepted {
            poll_id: *poll_id,
            voter: voter.clone(),
            option: option.to_string(),
        });
        Ok(vote)
    }

    pub fn get_tally(&self, poll_id: &PollId) -> Result<Tally, NodeError> {
        Ok(self.tally.tally(poll_id)?)
    }

    /// Formatted current results, no tie-break applied.
    pub fn get_presented_tally(
        &self,
        poll_id: &PollId,
        presentation: PresentationKind,
    ) -> Result<String, NodeError> {
        Ok(present(presentation, &self.get_tally(poll_id)?))
    }

    /// Formatted final results with the chosen tie-break policy.
    pub fn get_presented_results(
        &self,
        poll_id: &PollId,
        tie_break: TieBreakKind,
        presentation: PresentationKind,
        rng: &mut dyn RngCore,
    ) -> Result<String, NodeError> {
        let tally = self.get_tally(poll_id)?;
        Ok(present_final(&tally, tie_break, presentation, rng))
    }

    // ── Tokens ──────────────────────────────────────────────────────────

    pub fn list_tokens_by_owner(&self, owner: &Username) -> Result<Vec<TokenRecord>, NodeError> {
        Ok(self.ledger.list_by_owner(owner)?)
    }

    pub fn get_token(&self, token_id: &TokenId) -> Result<TokenRecord, NodeError> {
        Ok(self.ledger.get(token_id)?)
    }

    pub fn transfer_token(
        &self,
        token_id: TokenId,
        from: &Username,
        to: &Username,
    ) -> Result<(), NodeError> {
        Ok(self.ledger.transfer(token_id, from, to)?)
    }

    // ── Collaborators ───────────────────────────────────────────────────

    /// The user directory (registration, login, identity resolution).
    pub fn directory(&self) -> &DirectoryService {
        &self.directory
    }

    /// Resolve a session token to the identity it was issued to.
    pub fn current_identity(&self, session: &vox_types::SessionToken) -> Option<Username> {
        self.directory.current_identity(session)
    }

    /// Subscribe to poll events on a bounded queue.
    pub fn subscribe_events(&self) -> Receiver<PollEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_nullables::NullStore;
    use vox_poll::PollError;

    fn node_with_users(users: &[&str]) -> VoxNode {
        let store = Arc::new(NullStore::new());
        let node = VoxNode::with_stores(
            NodeConfig::default(),
            Arc::clone(&store) as Arc<dyn PollStore>,
            Arc::clone(&store) as Arc<dyn TokenStore>,
            Arc::clone(&store) as Arc<dyn UserStore>,
        );
        for user in users {
            node.directory().register(&Username::new(*user)).unwrap();
        }
        node
    }

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_poll_scenario_vote_then_duplicate() {
        let node = node_with_users(&["user1"]);
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        let user = Username::new("user1");

        node.vote(&poll.id, &user, "A").unwrap();
        let tally = node.get_tally(&poll.id).unwrap();
        assert_eq!(tally.count("A"), 1);
        assert_eq!(tally.count("B"), 0);

        let err = node.vote(&poll.id, &user, "A").unwrap_err();
        assert!(matches!(
            err,
            NodeError::Poll(PollError::AlreadyVoted { .. })
        ));
    }

    #[test]
    fn vote_mints_a_transferable_token() {
        let node = node_with_users(&["bob", "alice"]);
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        let bob = Username::new("bob");
        let alice = Username::new("alice");

        let vote = node.vote(&poll.id, &bob, "A").unwrap();
        let held = node.list_tokens_by_owner(&bob).unwrap();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].option, "A");

        node.transfer_token(vote.token_id, &bob, &alice).unwrap();
        assert!(node.list_tokens_by_owner(&bob).unwrap().is_empty());
        assert_eq!(node.list_tokens_by_owner(&alice).unwrap().len(), 1);
        assert_eq!(node.get_token(&vote.token_id).unwrap().owner, alice);
    }

    #[test]
    fn close_emits_one_event_per_transition() {
        let node = node_with_users(&[]);
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        let rx = node.subscribe_events();

        assert!(node.close_poll(&poll.id).unwrap());
        assert!(!node.close_poll(&poll.id).unwrap());

        assert_eq!(
            rx.try_recv().unwrap(),
            PollEvent::PollClosed { poll_id: poll.id }
        );
        assert!(rx.try_recv().is_err(), "idempotent close must not re-emit");
    }

    #[test]
    fn vote_emits_vote_accepted() {
        let node = node_with_users(&["bob"]);
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        let rx = node.subscribe_events();

        node.vote(&poll.id, &Username::new("bob"), "B").unwrap();

        match rx.try_recv().unwrap() {
            PollEvent::VoteAccepted { poll_id, voter, option } => {
                assert_eq!(poll_id, poll.id);
                assert_eq!(voter, Username::new("bob"));
                assert_eq!(option, "B");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn failed_vote_emits_nothing() {
        let node = node_with_users(&["bob"]);
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        let rx = node.subscribe_events();

        assert!(node.vote(&poll.id, &Username::new("bob"), "C").is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn presented_results_render_through_the_facade() {
        let node = node_with_users(&["bob"]);
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        node.vote(&poll.id, &Username::new("bob"), "A").unwrap();

        let text = node
            .get_presented_tally(&poll.id, PresentationKind::Text)
            .unwrap();
        assert_eq!(text, "A: 1 voto(s)\nB: 0 voto(s)");

        let json = node
            .get_presented_tally(&poll.id, PresentationKind::Json)
            .unwrap();
        assert_eq!(json, r#"{"A":1,"B":0}"#);
    }

    #[test]
    fn session_identity_flows_through_the_facade() {
        let node = node_with_users(&["bob"]);
        let bob = Username::new("bob");
        let session = node.directory().login(&bob).unwrap();

        let voter = node.current_identity(&session).expect("live session");
        let poll = node
            .create_poll("A or B?", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        node.vote(&poll.id, &voter, "A").unwrap();
        assert_eq!(node.get_tally(&poll.id).unwrap().count("A"), 1);

        node.directory().logout(&session);
        assert_eq!(node.current_identity(&session), None);
    }

    #[test]
    fn list_polls_filters_by_activity() {
        let node = node_with_users(&[]);
        let a = node
            .create_poll("first", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        let b = node
            .create_poll("second", &options(&["A", "B"]), 60, PollKind::Single)
            .unwrap();
        node.close_poll(&a.id).unwrap();

        let active = node.list_polls(true).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, b.id);
        assert_eq!(node.list_polls(false).unwrap().len(), 2);
    }
}
