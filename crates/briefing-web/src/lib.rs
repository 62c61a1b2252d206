pub mod controller;
pub mod form;
pub mod validate;

pub use controller::{FormController, FormCreatorConfig, SubmitHandler, TabIndicator};
pub use form::{
    AnswerNode, Checkbox, CheckboxGroup, ErrorNode, FormNode, QuestionNode, SelectControl,
    SelectOption, SubmitButton, TextArea, TextInput, escape_html, render_answer, render_form,
    render_question,
};
pub use validate::{extract_answer, validate_question};

use briefing_core::page::FormPage;

fn base_form_css() -> String {
    r#"
html, body {
  margin: 0;
  padding: 0;
  min-height: 100%;
  font-family: Inter, system-ui, sans-serif;
  color: #0f172a;
  background: #f8fafc;
}

#briefing-form {
  max-width: 640px;
  margin: 0 auto;
  padding: 16px;
}

.briefing-tabs {
  display: flex;
  gap: 8px;
  max-width: 640px;
  margin: 0 auto;
  padding: 16px 16px 0;
}

.briefing-tab {
  padding: 8px 14px;
  border-radius: 10px 10px 0 0;
  background: #e2e8f0;
  color: #64748b;
  font-weight: 600;
  text-transform: uppercase;
}

.briefing-tab._selected {
  background: #2563eb;
  color: #ffffff;
}

.briefing-questionsContainer {
  border: 0;
  margin: 0;
  padding: 0;
}

.briefing-question {
  display: flex;
  flex-direction: column;
  gap: 6px;
  margin: 0 0 20px;
}

.briefing-question._isInvalid .briefing-questionText,
.briefing-question._isInvalid .briefing-questionTextarea,
.briefing-question._isInvalid .briefing-questionSelect {
  border-color: #dc2626;
}

.briefing-questionTitle {
  font-weight: 600;
}

.briefing-questionText,
.briefing-questionTextarea,
.briefing-questionSelect {
  font: inherit;
  color: inherit;
  border: 1px solid #e2e8f0;
  border-radius: 10px;
  background: #ffffff;
  min-height: 40px;
  padding: 10px 12px;
  width: 100%;
  box-sizing: border-box;
}

.briefing-questionText.--small {
  width: 50%;
}

.briefing-questionTextarea {
  min-height: 120px;
  resize: vertical;
}

.briefing-questionOption label {
  display: flex;
  align-items: center;
  gap: 8px;
}

.briefing-questionError {
  color: #dc2626;
  font-size: 14px;
}

.briefing-finish {
  font: inherit;
  background: #2563eb;
  border: 1px solid #2563eb;
  border-radius: 10px;
  color: #ffffff;
  font-weight: 600;
  padding: 10px 14px;
  cursor: pointer;
}
"#
    .to_string()
}

fn render_tab(id: &str, tab: &TabIndicator) -> String {
    let class = if tab.selected {
        "briefing-tab _selected"
    } else {
        "briefing-tab"
    };
    format!(
        "<span id=\"{id}\" class=\"{class}\">{}</span>",
        escape_html(&tab.label)
    )
}

/// Full-document projection of the controller: tab indicators plus
/// whatever form is currently mounted inside the wrapper node.
pub fn render_page(controller: &FormController) -> String {
    let form_html = match controller.mounted() {
        Some(FormPage::Request) => render_form(controller.form(FormPage::Request)),
        Some(FormPage::User) => render_form(controller.form(FormPage::User)),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>briefing</title><style>{}</style></head><body><nav class=\"briefing-tabs\">{}{}</nav><div id=\"briefing-form\">{}</div></body></html>",
        base_form_css(),
        render_tab("requestTab", controller.request_tab()),
        render_tab("userTab", controller.user_tab()),
        form_html
    )
}
