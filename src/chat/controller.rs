use tracing::{debug, info};

use super::message::ChatMessage;
use super::render;
use super::step::{canonical_option, Step};
use crate::app::OptionsConfig;
use crate::cache::PredictionCache;
use crate::constants::{ALL_PLACES, ALL_PLACES_LABEL};
use crate::predictor::{PredictionInput, Predictor};
use crate::utils::CounselorError;

pub const INVALID_RANK_MESSAGE: &str = "❌ Please enter a valid rank number (e.g., 1500).";

pub const PREDICTION_FAILED_MESSAGE: &str =
    "❌ Sorry, I encountered an error while processing your request. Please try again.";

const FREE_TEXT_REPLY: &str =
    "I understand you typed something, but for the best experience, please use the option \
     buttons to navigate through the prediction process. 😊";

/// Profile fields accumulated one step at a time.
///
/// Fields fill strictly in step order; the profile is complete only once
/// `rank` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub college_type: Option<String>,
    pub exam_type: Option<String>,
    pub category: Option<String>,
    pub place: Option<String>,
    pub state: Option<String>,
    pub rank: Option<u32>,
}

/// Where the dialogue currently stands: the step plus everything collected so far
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationState {
    pub step: Step,
    pub data: ProfileData,
}

impl ConversationState {
    fn new() -> Self {
        Self {
            step: Step::Welcome,
            data: ProfileData::default(),
        }
    }
}

/// What the runtime should do after a selection is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// The dialogue advanced; print the new prompt and options
    Prompt,
    /// Switch to numeric rank entry
    AwaitRank,
    /// The conversation was reset to the welcome step
    Reset,
    /// The user asked to close the chat (presentation only, state unchanged)
    Exit,
    /// The selection did not apply at this step
    Ignored,
}

/// Drives one guided dialogue instance.
///
/// Owns its [`ConversationState`] outright; nothing here is global, so any
/// number of controllers can run side by side. The controller appends every
/// turn to an internal transcript that the runtime drains for display.
pub struct ChatController {
    state: ConversationState,
    options: OptionsConfig,
    transcript: Vec<ChatMessage>,
    seen: usize,
    in_flight: bool,
}

impl ChatController {
    /// Start a fresh dialogue at the welcome step
    pub fn new(options: OptionsConfig) -> Self {
        let mut controller = Self {
            state: ConversationState::new(),
            options,
            transcript: Vec::new(),
            seen: 0,
            in_flight: false,
        };
        controller.push_bot(Step::Welcome.prompt(""));
        controller
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// True while a prediction request is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Option labels for the current step
    pub fn current_options(&self) -> Vec<String> {
        self.state.step.options(&self.options)
    }

    /// Apply one option selection at the current step.
    ///
    /// The raw label may carry a decorative prefix; the canonical value is
    /// what gets stored. Selecting the "All Locations" sentinel stores the
    /// canonical "All" value, and resolving the place also pins `state` to
    /// the configured region.
    pub fn submit_selection(&mut self, raw: &str) -> TurnAction {
        let clean = canonical_option(raw);

        match self.state.step {
            Step::Welcome => {
                self.push_user(&clean);
                self.advance(&clean);
                TurnAction::Prompt
            }
            Step::CollegeType => {
                self.state.data.college_type = Some(clean.clone());
                self.push_user(&clean);
                self.advance(&clean);
                TurnAction::Prompt
            }
            Step::ExamType => {
                self.state.data.exam_type = Some(clean.clone());
                self.push_user(&clean);
                self.advance(&clean);
                TurnAction::Prompt
            }
            Step::Category => {
                self.state.data.category = Some(clean.clone());
                self.push_user(&clean);
                self.advance(&clean);
                TurnAction::Prompt
            }
            Step::Place => {
                let place = if clean == ALL_PLACES_LABEL {
                    ALL_PLACES.to_string()
                } else {
                    clean.clone()
                };
                self.state.data.place = Some(place);
                self.state.data.state = Some(self.options.state.clone());
                self.push_user(&clean);
                self.advance(&clean);
                TurnAction::Prompt
            }
            Step::Rank => {
                if clean.contains("Enter Rank") {
                    TurnAction::AwaitRank
                } else {
                    TurnAction::Ignored
                }
            }
            Step::Complete => {
                if clean.contains("New Prediction") {
                    self.reset();
                    TurnAction::Reset
                } else {
                    TurnAction::Exit
                }
            }
        }
    }

    /// Validate and store the rank, returning the assembled prediction input.
    ///
    /// A missing, zero, or non-numeric rank reports an inline message and
    /// leaves the dialogue at the rank step; no request is made.
    pub fn submit_rank(&mut self, raw: &str) -> Result<PredictionInput, CounselorError> {
        if self.state.step != Step::Rank {
            return Err(CounselorError::Validation(
                "Please answer the earlier questions before entering a rank.".to_string(),
            ));
        }

        let rank = match raw.trim().parse::<u32>() {
            Ok(r) if r > 0 => r,
            _ => {
                self.push_bot(INVALID_RANK_MESSAGE);
                return Err(CounselorError::Validation(INVALID_RANK_MESSAGE.to_string()));
            }
        };

        self.state.data.rank = Some(rank);
        self.push_user(rank.to_string());
        self.build_input()
    }

    /// Resolve one prediction: cache first, then the service.
    ///
    /// On a cache hit the service is never called. On a miss the result is
    /// cached and rendered; on failure an inline message is rendered, the
    /// cache is left untouched, and the dialogue stays at the rank step so
    /// the user can resubmit or reset.
    pub async fn run_prediction(
        &mut self,
        predictor: &dyn Predictor,
        cache: &mut PredictionCache,
    ) -> Result<(), CounselorError> {
        if self.in_flight {
            return Err(CounselorError::Validation(
                "A prediction is already in progress. Please wait.".to_string(),
            ));
        }

        let input = self.build_input()?;

        if let Some(results) = cache.lookup(&input) {
            info!("serving prediction from cache");
            let results = results.clone();
            self.finish_with_results(&render::format_results(&results));
            return Ok(());
        }

        self.in_flight = true;
        let outcome = predictor.predict(&input).await;
        self.in_flight = false;

        match outcome {
            Ok(results) => {
                cache.store(input, results.clone());
                self.finish_with_results(&render::format_results(&results));
                Ok(())
            }
            Err(err) => {
                debug!("prediction failed: {err}");
                let message = match &err {
                    CounselorError::Service { .. } => format!("❌ {err} Please try again."),
                    _ => PREDICTION_FAILED_MESSAGE.to_string(),
                };
                self.push_bot(message);
                Err(err)
            }
        }
    }

    /// Canned reply for free text typed outside the rank entry
    pub fn handle_free_text(&mut self, text: &str) {
        self.push_user(text);
        self.push_bot(FREE_TEXT_REPLY);
    }

    /// Restart at the welcome step, clearing all collected data
    pub fn reset(&mut self) {
        self.state = ConversationState::new();
        self.in_flight = false;
        self.push_bot(Step::Welcome.prompt(""));
    }

    /// Transcript lines appended since the last drain
    pub fn drain_unseen(&mut self) -> Vec<ChatMessage> {
        let new = self.transcript[self.seen..].to_vec();
        self.seen = self.transcript.len();
        new
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Assemble the request payload from the collected profile
    fn build_input(&self) -> Result<PredictionInput, CounselorError> {
        let data = &self.state.data;
        let missing = || {
            CounselorError::Validation(
                "The prediction profile is incomplete. Please restart the conversation."
                    .to_string(),
            )
        };
        Ok(PredictionInput {
            exam_type: data.exam_type.clone().ok_or_else(missing)?,
            state: data.state.clone().ok_or_else(missing)?,
            place: data.place.clone().ok_or_else(missing)?,
            rank: data.rank.ok_or_else(missing)?,
            category: data.category.clone().ok_or_else(missing)?,
            college_type: data.college_type.clone().ok_or_else(missing)?,
        })
    }

    fn advance(&mut self, selection: &str) {
        self.state.step = self.state.step.next();
        self.push_bot(self.state.step.prompt(selection));
    }

    fn finish_with_results(&mut self, rendered: &str) {
        self.push_bot(rendered);
        self.state.step = Step::Complete;
    }

    fn push_user(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::user(content));
    }

    fn push_bot(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::bot(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{MessageRole, NO_RESULTS_MESSAGE};
    use crate::predictor::{College, PredictionResult};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Respond(PredictionResult),
        TransportFail,
        ServiceFail,
    }

    struct MockPredictor {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl MockPredictor {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Predictor for MockPredictor {
        async fn predict(
            &self,
            _input: &PredictionInput,
        ) -> Result<PredictionResult, CounselorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Respond(results) => Ok(results.clone()),
                Behavior::TransportFail => {
                    Err(CounselorError::Transport("connection refused".to_string()))
                }
                Behavior::ServiceFail => Err(CounselorError::Service {
                    status: 500,
                    body: "internal error".to_string(),
                }),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn one_exact_match() -> PredictionResult {
        PredictionResult {
            exact_matches: vec![College {
                college_name: "ABC Institute".to_string(),
                college_id: "C001".to_string(),
                place: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                opening_cutoff_rank: 1000,
                closing_cutoff_rank: 2000,
                seats: 60,
                year: 2023,
                website: "https://abc.example.edu".to_string(),
            }],
            ..Default::default()
        }
    }

    /// Walk the dialogue through every field up to the rank step
    fn controller_at_rank() -> ChatController {
        let mut controller = ChatController::new(OptionsConfig::default());
        controller.submit_selection("🎓 Start Prediction");
        controller.submit_selection("📚 MCA");
        controller.submit_selection("📝 PGCET");
        controller.submit_selection("👤 GM");
        controller.submit_selection("🌍 All Locations");
        assert_eq!(controller.step(), Step::Rank);
        controller
    }

    fn last_bot_message(controller: &ChatController) -> &str {
        controller
            .transcript()
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Bot)
            .map(|m| m.content.as_str())
            .unwrap()
    }

    #[test]
    fn test_full_flow_builds_canonical_input() {
        let mut controller = controller_at_rank();
        let input = controller.submit_rank("1500").unwrap();

        assert_eq!(
            input,
            PredictionInput {
                exam_type: "PGCET".to_string(),
                state: "Karnataka".to_string(),
                place: "All".to_string(),
                rank: 1500,
                category: "GM".to_string(),
                college_type: "MCA".to_string(),
            }
        );
    }

    #[test]
    fn test_specific_place_keeps_canonical_value() {
        let mut controller = ChatController::new(OptionsConfig::default());
        controller.submit_selection("🎓 Start Prediction");
        controller.submit_selection("📚 MBA");
        controller.submit_selection("📝 PGCET");
        controller.submit_selection("👤 SC");
        controller.submit_selection("📍 Mysore");

        let input = controller.submit_rank("42").unwrap();
        assert_eq!(input.place, "Mysore");
        assert_eq!(input.college_type, "MBA");
    }

    #[test]
    fn test_invalid_rank_never_advances_or_calls_out() {
        let mut controller = controller_at_rank();

        for bad in ["abc", "0", "-5", "", "  "] {
            assert!(controller.submit_rank(bad).is_err());
            assert_eq!(controller.step(), Step::Rank);
            assert_eq!(last_bot_message(&controller), INVALID_RANK_MESSAGE);
        }
        assert_eq!(controller.state().data.rank, None);
    }

    #[test]
    fn test_rank_before_place_is_rejected() {
        let mut controller = ChatController::new(OptionsConfig::default());
        controller.submit_selection("🎓 Start Prediction");
        let err = controller.submit_rank("1500").unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_cache_hit_suppresses_network_call() {
        let mut controller = controller_at_rank();
        let input = controller.submit_rank("1500").unwrap();

        let mut cache = PredictionCache::in_memory();
        cache.store(input, one_exact_match());

        let predictor = MockPredictor::new(Behavior::TransportFail);
        controller
            .run_prediction(&predictor, &mut cache)
            .await
            .unwrap();

        assert_eq!(predictor.calls(), 0, "cache hit must not touch the network");
        assert!(last_bot_message(&controller).contains("ABC Institute"));
        assert_eq!(controller.step(), Step::Complete);
    }

    #[tokio::test]
    async fn test_successful_prediction_renders_and_caches() {
        let mut controller = controller_at_rank();
        let input = controller.submit_rank("1500").unwrap();

        let mut cache = PredictionCache::in_memory();
        let predictor = MockPredictor::new(Behavior::Respond(one_exact_match()));
        controller
            .run_prediction(&predictor, &mut cache)
            .await
            .unwrap();

        assert_eq!(predictor.calls(), 1);
        assert!(last_bot_message(&controller).contains("ABC Institute"));
        assert_eq!(controller.step(), Step::Complete);
        assert!(cache.lookup(&input).is_some());
        assert_eq!(
            controller.current_options(),
            vec!["🔄 New Prediction", "❌ Close"]
        );
    }

    #[tokio::test]
    async fn test_all_empty_buckets_render_no_results_message() {
        let mut controller = controller_at_rank();
        controller.submit_rank("999999").unwrap();

        let mut cache = PredictionCache::in_memory();
        let predictor = MockPredictor::new(Behavior::Respond(PredictionResult::default()));
        controller
            .run_prediction(&predictor, &mut cache)
            .await
            .unwrap();

        assert_eq!(last_bot_message(&controller), NO_RESULTS_MESSAGE);
        assert_eq!(controller.step(), Step::Complete);
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_cache_untouched() {
        let mut controller = controller_at_rank();
        let input = controller.submit_rank("1500").unwrap();

        let mut cache = PredictionCache::in_memory();
        let predictor = MockPredictor::new(Behavior::TransportFail);
        let err = controller
            .run_prediction(&predictor, &mut cache)
            .await
            .unwrap_err();

        assert!(matches!(err, CounselorError::Transport(_)));
        assert_eq!(last_bot_message(&controller), PREDICTION_FAILED_MESSAGE);
        assert!(cache.is_empty());
        assert!(cache.lookup(&input).is_none());
        // Still at the rank step, so the user can resubmit
        assert_eq!(controller.step(), Step::Rank);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_service_error_surfaces_diagnostic_text() {
        let mut controller = controller_at_rank();
        controller.submit_rank("1500").unwrap();

        let mut cache = PredictionCache::in_memory();
        let predictor = MockPredictor::new(Behavior::ServiceFail);
        let err = controller
            .run_prediction(&predictor, &mut cache)
            .await
            .unwrap_err();

        assert!(matches!(err, CounselorError::Service { status: 500, .. }));
        assert!(last_bot_message(&controller).contains("internal error"));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        let mut controller = controller_at_rank();
        controller.submit_rank("1500").unwrap();

        let mut cache = PredictionCache::in_memory();
        let failing = MockPredictor::new(Behavior::TransportFail);
        assert!(controller.run_prediction(&failing, &mut cache).await.is_err());

        // Resubmitting the rank retries the whole dispatch
        controller.submit_rank("1500").unwrap();
        let working = MockPredictor::new(Behavior::Respond(one_exact_match()));
        controller
            .run_prediction(&working, &mut cache)
            .await
            .unwrap();
        assert_eq!(controller.step(), Step::Complete);
    }

    #[test]
    fn test_new_prediction_resets_conversation() {
        let mut controller = controller_at_rank();
        controller.state.step = Step::Complete;

        let action = controller.submit_selection("🔄 New Prediction");
        assert_eq!(action, TurnAction::Reset);
        assert_eq!(controller.step(), Step::Welcome);
        assert_eq!(controller.state().data, ProfileData::default());
        assert!(last_bot_message(&controller).contains("Welcome to College Predictor"));
    }

    #[test]
    fn test_close_leaves_state_untouched() {
        let mut controller = controller_at_rank();
        controller.state.step = Step::Complete;
        let data_before = controller.state().data.clone();

        let action = controller.submit_selection("❌ Close");
        assert_eq!(action, TurnAction::Exit);
        assert_eq!(controller.step(), Step::Complete);
        assert_eq!(controller.state().data, data_before);
    }

    #[test]
    fn test_enter_rank_option_awaits_numeric_entry() {
        let mut controller = controller_at_rank();
        assert_eq!(
            controller.submit_selection("🔢 Enter Rank"),
            TurnAction::AwaitRank
        );
        assert_eq!(controller.submit_selection("nonsense"), TurnAction::Ignored);
    }

    #[test]
    fn test_drain_unseen_is_incremental() {
        let mut controller = ChatController::new(OptionsConfig::default());
        let first = controller.drain_unseen();
        assert_eq!(first.len(), 1); // welcome message

        controller.submit_selection("🎓 Start Prediction");
        let second = controller.drain_unseen();
        assert_eq!(second.len(), 2); // user turn + next prompt
        assert!(controller.drain_unseen().is_empty());
    }

    #[test]
    fn test_free_text_gets_canned_reply() {
        let mut controller = ChatController::new(OptionsConfig::default());
        controller.handle_free_text("hello?");
        assert!(last_bot_message(&controller).contains("option buttons"));
        assert_eq!(controller.step(), Step::Welcome);
    }
}
