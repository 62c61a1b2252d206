use crate::form::FormNode;
use briefing_core::answer::FormAnswers;
use briefing_core::error::FormError;
use briefing_core::page::FormPage;
use briefing_core::schema::{FormSchema, Question};

/// Externally supplied submission callback, invoked with both pages'
/// answer maps once the user page validates.
pub type SubmitHandler = Box<dyn FnMut(&FormAnswers)>;

/// Construction options, mirroring the document the embedding
/// application would pass: initial page, button labels, callback.
pub struct FormCreatorConfig {
    pub page: FormPage,
    pub request_button_text: String,
    pub user_button_text: String,
    pub on_submitted: Option<SubmitHandler>,
}

impl Default for FormCreatorConfig {
    fn default() -> Self {
        Self {
            page: FormPage::Request,
            request_button_text: "BUSCAR PROFISSIONAIS".to_string(),
            user_button_text: "FINALIZAR".to_string(),
            on_submitted: None,
        }
    }
}

/// External page-tab indicator; carries the `_selected` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabIndicator {
    pub label: String,
    pub selected: bool,
}

impl TabIndicator {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            selected: false,
        }
    }
}

/// Two-page form controller.
///
/// Both pages' forms are built up front; `render` decides which one is
/// mounted. State lives in explicit fields and transitions are
/// methods, with no callback-captured state.
pub struct FormController {
    page: FormPage,
    mounted: Option<FormPage>,
    request_form: FormNode,
    user_form: FormNode,
    request_tab: TabIndicator,
    user_tab: TabIndicator,
    on_submitted: Option<SubmitHandler>,
}

impl FormController {
    pub fn new(schema: &FormSchema, config: FormCreatorConfig) -> Self {
        let request_questions = Question::resolve_all(&schema.request_fields);
        let user_questions = Question::resolve_all(&schema.user_fields);

        Self {
            page: config.page,
            mounted: None,
            request_form: FormNode::render(&request_questions, &config.request_button_text),
            user_form: FormNode::render(&user_questions, &config.user_button_text),
            request_tab: TabIndicator::new("request"),
            user_tab: TabIndicator::new("user"),
            on_submitted: config.on_submitted,
        }
    }

    pub fn page(&self) -> FormPage {
        self.page
    }

    /// Which page's form is currently attached; `None` before the
    /// first `render`.
    pub fn mounted(&self) -> Option<FormPage> {
        self.mounted
    }

    pub fn request_tab(&self) -> &TabIndicator {
        &self.request_tab
    }

    pub fn user_tab(&self) -> &TabIndicator {
        &self.user_tab
    }

    pub fn form(&self, page: FormPage) -> &FormNode {
        match page {
            FormPage::Request => &self.request_form,
            FormPage::User => &self.user_form,
        }
    }

    pub fn form_mut(&mut self, page: FormPage) -> &mut FormNode {
        match page {
            FormPage::Request => &mut self.request_form,
            FormPage::User => &mut self.user_form,
        }
    }

    pub fn current_form(&self) -> &FormNode {
        self.form(self.page)
    }

    pub fn current_form_mut(&mut self) -> &mut FormNode {
        self.form_mut(self.page)
    }

    /// Detaches whatever is mounted, attaches the current page's form
    /// and moves the `_selected` marker. Exactly one form is mounted
    /// afterwards.
    pub fn render(&mut self) {
        self.mounted = Some(self.page);
        self.request_tab.selected = self.page == FormPage::Request;
        self.user_tab.selected = self.page == FormPage::User;
    }

    pub fn set_page(&mut self, page: FormPage) {
        self.page = page;
        self.render();
    }

    /// Validates every field of the current page; all errors are
    /// surfaced, the result is the AND over all of them.
    pub fn validate_current_page(&mut self) -> bool {
        self.current_form_mut().validate()
    }

    /// Request page only. Transitions to the user page when the
    /// current page validates; otherwise stays put with the errors
    /// attached.
    pub fn advance_to_user_page(&mut self) -> Result<bool, FormError> {
        if self.page != FormPage::Request {
            return Err(FormError::new(
                "page.transition",
                "advance_to_user_page is only callable from the request page",
            ));
        }

        if !self.validate_current_page() {
            return Ok(false);
        }

        self.set_page(FormPage::User);
        Ok(true)
    }

    /// User page only. On validation pass, extracts both pages'
    /// answers, hands them to the submission callback and returns
    /// them; on failure returns `Ok(None)` with entered values intact.
    pub fn submit(&mut self) -> Result<Option<FormAnswers>, FormError> {
        if self.page != FormPage::User {
            return Err(FormError::new(
                "page.transition",
                "submit is only callable from the user page",
            ));
        }

        if !self.validate_current_page() {
            return Ok(None);
        }

        let answers = self.answers();
        if let Some(handler) = self.on_submitted.as_mut() {
            handler(&answers);
        }
        Ok(Some(answers))
    }

    /// Extraction over both pages, regardless of the current page.
    pub fn answers(&self) -> FormAnswers {
        FormAnswers {
            request_answers: self.request_form.answers(),
            user_answers: self.user_form.answers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::AnswerNode;
    use briefing_core::answer::AnswerValue;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn schema() -> FormSchema {
        FormSchema::from_json(
            r#"{
                "request_fields": [
                    { "name": "description", "label": "Descreva", "type": "big_text", "required": true }
                ],
                "user_fields": [
                    { "name": "email", "label": "Email", "type": "email", "required": true }
                ]
            }"#,
        )
        .unwrap()
    }

    fn fill_text(controller: &mut FormController, page: FormPage, name: &str, value: &str) {
        let node = controller.form_mut(page).question_mut(name).unwrap();
        match &mut node.answer {
            AnswerNode::Text(input) => input.set_value(value),
            AnswerNode::TextArea(area) => area.set_value(value),
            other => panic!("not a text control: {other:?}"),
        }
    }

    #[test]
    fn test_initial_state_and_first_render() {
        let mut controller = FormController::new(&schema(), FormCreatorConfig::default());
        assert_eq!(controller.page(), FormPage::Request);
        assert_eq!(controller.mounted(), None);

        controller.render();
        assert_eq!(controller.mounted(), Some(FormPage::Request));
        assert!(controller.request_tab().selected);
        assert!(!controller.user_tab().selected);
    }

    #[test]
    fn test_advance_blocked_by_invalid_page() {
        let mut controller = FormController::new(&schema(), FormCreatorConfig::default());
        controller.render();

        assert_eq!(controller.advance_to_user_page().unwrap(), false);
        assert_eq!(controller.page(), FormPage::Request);
        assert!(controller
            .current_form()
            .question("description")
            .unwrap()
            .is_invalid());
    }

    #[test]
    fn test_advance_transitions_when_valid() {
        let mut controller = FormController::new(&schema(), FormCreatorConfig::default());
        controller.render();
        fill_text(&mut controller, FormPage::Request, "description", "pintar a casa");

        assert_eq!(controller.advance_to_user_page().unwrap(), true);
        assert_eq!(controller.page(), FormPage::User);
        assert_eq!(controller.mounted(), Some(FormPage::User));
        assert!(controller.user_tab().selected);
        assert!(!controller.request_tab().selected);
    }

    #[test]
    fn test_advance_from_user_page_is_an_error() {
        let mut controller = FormController::new(&schema(), FormCreatorConfig::default());
        controller.set_page(FormPage::User);
        let err = controller.advance_to_user_page().unwrap_err();
        assert_eq!(err.code, "page.transition");
    }

    #[test]
    fn test_submit_from_request_page_is_an_error() {
        let mut controller = FormController::new(&schema(), FormCreatorConfig::default());
        controller.render();
        let err = controller.submit().unwrap_err();
        assert_eq!(err.code, "page.transition");
    }

    #[test]
    fn test_submit_invalid_returns_none_and_keeps_values() {
        let mut controller = FormController::new(&schema(), FormCreatorConfig::default());
        controller.set_page(FormPage::User);
        fill_text(&mut controller, FormPage::User, "email", "not-an-email");

        assert_eq!(controller.submit().unwrap(), None);
        assert_eq!(
            controller.form(FormPage::User).answers().get("email"),
            Some(&AnswerValue::Text("not-an-email".into()))
        );
    }

    #[test]
    fn test_full_flow_invokes_callback_once() {
        let seen: Rc<RefCell<Vec<FormAnswers>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut controller = FormController::new(
            &schema(),
            FormCreatorConfig {
                on_submitted: Some(Box::new(move |answers| {
                    sink.borrow_mut().push(answers.clone());
                })),
                ..FormCreatorConfig::default()
            },
        );
        controller.render();

        fill_text(&mut controller, FormPage::Request, "description", "trocar chuveiro");
        assert!(controller.advance_to_user_page().unwrap());

        fill_text(&mut controller, FormPage::User, "email", "a@b.co");
        let answers = controller.submit().unwrap().expect("valid submission");

        assert_eq!(
            answers.request_answers.get("description"),
            Some(&AnswerValue::Text("trocar chuveiro".into()))
        );
        assert_eq!(
            answers.user_answers.get("email"),
            Some(&AnswerValue::Text("a@b.co".into()))
        );
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], answers);
    }

    #[test]
    fn test_default_button_labels() {
        let controller = FormController::new(&schema(), FormCreatorConfig::default());
        assert_eq!(controller.form(FormPage::Request).button.text, "BUSCAR PROFISSIONAIS");
        assert_eq!(controller.form(FormPage::User).button.text, "FINALIZAR");
    }
}
