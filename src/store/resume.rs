//! Session state for the workbench. All mutation goes through the named
//! transitions here; components never poke fields directly.
//!
//! Two invariants hold the state together:
//! - exactly one generated artifact is active at a time (the `Artifact`
//!   union), so a new result can never leave a stale sibling visible;
//! - every request carries a `RequestToken`, and a completion whose token
//!   generation no longer matches the operation slot is discarded, so a slow
//!   response cannot overwrite the result of a newer one.

use leptos::prelude::*;

use crate::api::resume::OptimizationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Parse,
    Optimize,
    Generate,
    Enhance,
    Portfolio,
    CoverLetter,
    Export,
}

const OPERATION_COUNT: usize = 7;

impl Operation {
    pub const ALL: [Operation; OPERATION_COUNT] = [
        Operation::Parse,
        Operation::Optimize,
        Operation::Generate,
        Operation::Enhance,
        Operation::Portfolio,
        Operation::CoverLetter,
        Operation::Export,
    ];

    fn index(self) -> usize {
        match self {
            Operation::Parse => 0,
            Operation::Optimize => 1,
            Operation::Generate => 2,
            Operation::Enhance => 3,
            Operation::Portfolio => 4,
            Operation::CoverLetter => 5,
            Operation::Export => 6,
        }
    }
}

/// The one generated document currently on display.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Artifact {
    #[default]
    None,
    ParsedResume(String),
    GeneratedResume(String),
    EnhancedResume(String),
    Portfolio(String),
    CoverLetter(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct OpSlot {
    loading: bool,
    error: Option<String>,
    generation: u32,
}

/// Proof that a completion belongs to the request that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    op: Operation,
    generation: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeState {
    resume_content: String,
    job_description: String,
    artifact: Artifact,
    optimization: Option<OptimizationResult>,
    slots: [OpSlot; OPERATION_COUNT],
}

impl ResumeState {
    // -- Reads --

    pub fn resume_content(&self) -> &str {
        &self.resume_content
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn optimization(&self) -> Option<&OptimizationResult> {
        self.optimization.as_ref()
    }

    /// Conversation id of the last optimization, used to chain follow-up
    /// optimize and enhance calls into one backend context.
    pub fn conversation_id(&self) -> Option<&str> {
        self.optimization
            .as_ref()
            .and_then(|r| r.conversation_id.as_deref())
    }

    pub fn loading(&self, op: Operation) -> bool {
        self.slots[op.index()].loading
    }

    pub fn error(&self, op: Operation) -> Option<&str> {
        self.slots[op.index()].error.as_deref()
    }

    /// First pending error in operation order, for the banner.
    pub fn first_error(&self) -> Option<&str> {
        Operation::ALL.iter().find_map(|op| self.error(*op))
    }

    pub fn parsed_resume_text(&self) -> &str {
        match &self.artifact {
            Artifact::ParsedResume(text) => text,
            _ => "",
        }
    }

    pub fn generated_resume(&self) -> &str {
        match &self.artifact {
            Artifact::GeneratedResume(text) => text,
            _ => "",
        }
    }

    pub fn enhanced_resume(&self) -> &str {
        match &self.artifact {
            Artifact::EnhancedResume(text) => text,
            _ => "",
        }
    }

    pub fn portfolio_html(&self) -> &str {
        match &self.artifact {
            Artifact::Portfolio(html) => html,
            _ => "",
        }
    }

    pub fn cover_letter(&self) -> &str {
        match &self.artifact {
            Artifact::CoverLetter(text) => text,
            _ => "",
        }
    }

    /// True while the active artifact is resume text in any of its forms,
    /// which is when the workbench shows the current-resume panel.
    pub fn has_resume_artifact(&self) -> bool {
        matches!(
            self.artifact,
            Artifact::ParsedResume(_) | Artifact::GeneratedResume(_) | Artifact::EnhancedResume(_)
        )
    }

    // -- Input bindings --

    pub fn set_resume_content(&mut self, text: String) {
        self.resume_content = text;
    }

    pub fn set_job_description(&mut self, text: String) {
        self.job_description = text;
    }

    // -- Request lifecycle --

    /// Marks the operation in flight and returns the token its completion
    /// must present. Starting a new request retires any token handed out
    /// earlier for the same operation.
    pub fn begin(&mut self, op: Operation) -> RequestToken {
        let slot = &mut self.slots[op.index()];
        slot.generation = slot.generation.wrapping_add(1);
        slot.loading = true;
        slot.error = None;
        RequestToken {
            op,
            generation: slot.generation,
        }
    }

    /// Clears the loading flag if the token is still current. A stale token
    /// leaves the slot alone: the newer request owns it now.
    fn accept(&mut self, token: RequestToken) -> bool {
        let slot = &mut self.slots[token.op.index()];
        if slot.generation != token.generation {
            return false;
        }
        slot.loading = false;
        true
    }

    pub fn complete_parse(&mut self, token: RequestToken, text: String) {
        if !self.accept(token) {
            return;
        }
        self.resume_content = text.clone();
        self.artifact = Artifact::ParsedResume(text);
        self.optimization = None;
    }

    pub fn complete_optimize(&mut self, token: RequestToken, result: OptimizationResult) {
        if !self.accept(token) {
            return;
        }
        self.optimization = Some(result);
    }

    pub fn complete_generate(&mut self, token: RequestToken, text: String) {
        if !self.accept(token) {
            return;
        }
        self.resume_content = text.clone();
        self.artifact = Artifact::GeneratedResume(text);
        self.optimization = None;
    }

    /// Unlike parse and generate, enhancing keeps the optimization result so
    /// its conversation id can chain further calls.
    pub fn complete_enhance(&mut self, token: RequestToken, text: String) {
        if !self.accept(token) {
            return;
        }
        self.resume_content = text.clone();
        self.artifact = Artifact::EnhancedResume(text);
    }

    pub fn complete_portfolio(&mut self, token: RequestToken, html: String) {
        if !self.accept(token) {
            return;
        }
        self.artifact = Artifact::Portfolio(html);
    }

    pub fn complete_cover_letter(&mut self, token: RequestToken, text: String) {
        if !self.accept(token) {
            return;
        }
        self.artifact = Artifact::CoverLetter(text);
    }

    pub fn complete_export(&mut self, token: RequestToken) {
        self.accept(token);
    }

    pub fn fail(&mut self, token: RequestToken, message: String) {
        if !self.accept(token) {
            return;
        }
        self.slots[token.op.index()].error = Some(message);
    }

    pub fn clear_errors(&mut self) {
        for slot in &mut self.slots {
            slot.error = None;
        }
    }
}

/// Context handle over the session state. Copy, so views and handlers can
/// capture it freely.
#[derive(Clone, Copy)]
pub struct ResumeStore {
    state: RwSignal<ResumeState>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(ResumeState::default()),
        }
    }

    pub fn with<R>(self, f: impl FnOnce(&ResumeState) -> R) -> R {
        self.state.with(f)
    }

    // -- Reads (each tracks the signal when called inside a view) --

    pub fn resume_content(self) -> String {
        self.with(|s| s.resume_content().to_string())
    }

    pub fn job_description(self) -> String {
        self.with(|s| s.job_description().to_string())
    }

    pub fn loading(self, op: Operation) -> bool {
        self.with(|s| s.loading(op))
    }

    pub fn first_error(self) -> Option<String> {
        self.with(|s| s.first_error().map(str::to_string))
    }

    pub fn optimization(self) -> Option<OptimizationResult> {
        self.with(|s| s.optimization().cloned())
    }

    pub fn conversation_id(self) -> Option<String> {
        self.with(|s| s.conversation_id().map(str::to_string))
    }

    pub fn generated_resume(self) -> String {
        self.with(|s| s.generated_resume().to_string())
    }

    pub fn enhanced_resume(self) -> String {
        self.with(|s| s.enhanced_resume().to_string())
    }

    pub fn portfolio_html(self) -> String {
        self.with(|s| s.portfolio_html().to_string())
    }

    pub fn cover_letter(self) -> String {
        self.with(|s| s.cover_letter().to_string())
    }

    pub fn has_resume_artifact(self) -> bool {
        self.with(|s| s.has_resume_artifact())
    }

    // -- Writes --

    pub fn set_resume_content(self, text: String) {
        self.state.update(|s| s.set_resume_content(text));
    }

    pub fn set_job_description(self, text: String) {
        self.state.update(|s| s.set_job_description(text));
    }

    pub fn begin(self, op: Operation) -> RequestToken {
        let mut token = RequestToken { op, generation: 0 };
        self.state.update(|s| token = s.begin(op));
        token
    }

    pub fn complete_parse(self, token: RequestToken, text: String) {
        self.state.update(|s| s.complete_parse(token, text));
    }

    pub fn complete_optimize(self, token: RequestToken, result: OptimizationResult) {
        self.state.update(|s| s.complete_optimize(token, result));
    }

    pub fn complete_generate(self, token: RequestToken, text: String) {
        self.state.update(|s| s.complete_generate(token, text));
    }

    pub fn complete_enhance(self, token: RequestToken, text: String) {
        self.state.update(|s| s.complete_enhance(token, text));
    }

    pub fn complete_portfolio(self, token: RequestToken, html: String) {
        self.state.update(|s| s.complete_portfolio(token, html));
    }

    pub fn complete_cover_letter(self, token: RequestToken, text: String) {
        self.state.update(|s| s.complete_cover_letter(token, text));
    }

    pub fn complete_export(self, token: RequestToken) {
        self.state.update(|s| s.complete_export(token));
    }

    pub fn fail(self, token: RequestToken, message: String) {
        self.state.update(|s| s.fail(token, message));
    }

    pub fn clear_errors(self) {
        self.state.update(|s| s.clear_errors());
    }
}

impl Default for ResumeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optimization(conversation_id: Option<&str>) -> OptimizationResult {
        OptimizationResult {
            optimization_score: 70.0,
            tailored_summary: "summary".into(),
            suggestions: Vec::new(),
            improved_resume_section: None,
            conversation_id: conversation_id.map(str::to_string),
        }
    }

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let mut state = ResumeState::default();
        let first = state.begin(Operation::Optimize);
        state.fail(first, "boom".into());
        assert_eq!(state.error(Operation::Optimize), Some("boom"));

        let _second = state.begin(Operation::Optimize);
        assert!(state.loading(Operation::Optimize));
        assert_eq!(state.error(Operation::Optimize), None);
    }

    #[test]
    fn parse_sets_both_texts_and_resets_results() {
        let mut state = ResumeState::default();
        let opt = state.begin(Operation::Optimize);
        state.complete_optimize(opt, optimization(Some("conv-1")));
        let gen = state.begin(Operation::Generate);
        state.complete_generate(gen, "old generated".into());

        let token = state.begin(Operation::Parse);
        state.complete_parse(token, "parsed text".into());

        assert_eq!(state.parsed_resume_text(), "parsed text");
        assert_eq!(state.resume_content(), "parsed text");
        assert_eq!(state.generated_resume(), "");
        assert_eq!(state.enhanced_resume(), "");
        assert_eq!(state.optimization(), None);
        assert!(!state.loading(Operation::Parse));
    }

    #[test]
    fn generate_replaces_parsed_text_and_optimization() {
        let mut state = ResumeState::default();
        let parse = state.begin(Operation::Parse);
        state.complete_parse(parse, "parsed".into());
        let opt = state.begin(Operation::Optimize);
        state.complete_optimize(opt, optimization(None));

        let token = state.begin(Operation::Generate);
        state.complete_generate(token, "generated".into());

        assert_eq!(state.generated_resume(), "generated");
        assert_eq!(state.resume_content(), "generated");
        assert_eq!(state.parsed_resume_text(), "");
        assert_eq!(state.optimization(), None);
    }

    #[test]
    fn enhance_keeps_optimization_for_conversation_chaining() {
        let mut state = ResumeState::default();
        let opt = state.begin(Operation::Optimize);
        state.complete_optimize(opt, optimization(Some("conv-2")));

        let token = state.begin(Operation::Enhance);
        state.complete_enhance(token, "enhanced".into());

        assert_eq!(state.enhanced_resume(), "enhanced");
        assert_eq!(state.resume_content(), "enhanced");
        assert_eq!(state.conversation_id(), Some("conv-2"));
    }

    #[test]
    fn one_artifact_is_active_at_a_time() {
        let mut state = ResumeState::default();
        let gen = state.begin(Operation::Generate);
        state.complete_generate(gen, "resume".into());
        assert!(state.has_resume_artifact());

        let portfolio = state.begin(Operation::Portfolio);
        state.complete_portfolio(portfolio, "<html></html>".into());

        assert_eq!(state.portfolio_html(), "<html></html>");
        assert_eq!(state.generated_resume(), "");
        assert!(!state.has_resume_artifact());
        // The working text survives artifact replacement.
        assert_eq!(state.resume_content(), "resume");
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = ResumeState::default();
        let first = state.begin(Operation::Generate);
        let second = state.begin(Operation::Generate);

        state.complete_generate(first, "late response".into());
        assert_eq!(state.generated_resume(), "");
        assert!(state.loading(Operation::Generate), "newer request still owns the flag");

        state.complete_generate(second, "current response".into());
        assert_eq!(state.generated_resume(), "current response");
        assert!(!state.loading(Operation::Generate));
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_request() {
        let mut state = ResumeState::default();
        let first = state.begin(Operation::Optimize);
        let second = state.begin(Operation::Optimize);

        state.fail(first, "late error".into());
        assert_eq!(state.error(Operation::Optimize), None);
        assert!(state.loading(Operation::Optimize));

        state.complete_optimize(second, optimization(None));
        assert!(state.optimization().is_some());
    }

    #[test]
    fn failure_lands_in_the_operation_slot() {
        let mut state = ResumeState::default();
        let token = state.begin(Operation::CoverLetter);
        state.fail(token, "API Error 400: jobDescription should not be empty".into());

        assert_eq!(
            state.error(Operation::CoverLetter),
            Some("API Error 400: jobDescription should not be empty")
        );
        assert_eq!(
            state.first_error(),
            Some("API Error 400: jobDescription should not be empty")
        );
        assert!(!state.loading(Operation::CoverLetter));
    }

    #[test]
    fn clear_errors_wipes_every_slot() {
        let mut state = ResumeState::default();
        for op in [Operation::Parse, Operation::Export] {
            let token = state.begin(op);
            state.fail(token, "err".into());
        }
        assert!(state.first_error().is_some());

        state.clear_errors();
        assert_eq!(state.first_error(), None);
    }

    #[test]
    fn first_error_follows_operation_order() {
        let mut state = ResumeState::default();
        let export = state.begin(Operation::Export);
        state.fail(export, "export failed".into());
        let parse = state.begin(Operation::Parse);
        state.fail(parse, "parse failed".into());

        assert_eq!(state.first_error(), Some("parse failed"));
    }

    #[test]
    fn typing_updates_content_without_touching_artifact() {
        let mut state = ResumeState::default();
        let parse = state.begin(Operation::Parse);
        state.complete_parse(parse, "parsed".into());

        state.set_resume_content("edited by hand".into());
        assert_eq!(state.resume_content(), "edited by hand");
        assert!(state.has_resume_artifact());
    }
}
