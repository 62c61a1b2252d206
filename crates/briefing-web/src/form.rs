use briefing_core::mask::InputMask;
use briefing_core::rules::UNSELECTED;
use briefing_core::schema::{EnumOption, FieldKind, Question};

/// Single-line text control. Phone fields carry the input mask and a
/// maximum typed length of `mask.max_len()` characters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub name: String,
    pub placeholder: String,
    pub small: bool,
    pub mask: Option<InputMask>,
    pub value: String,
}

impl TextInput {
    fn render(question: &Question, small: bool, mask: Option<InputMask>) -> Self {
        Self {
            name: question.name.clone(),
            placeholder: question.placeholder.clone(),
            small,
            mask,
            value: String::new(),
        }
    }

    /// One keystroke. Masked inputs reject the key once the displayed
    /// value is at maximum length, then reformat the whole value.
    pub fn push_key(&mut self, key: char) {
        if let Some(mask) = &self.mask {
            if self.value.chars().count() >= mask.max_len() {
                return;
            }
            self.value.push(key);
            self.value = mask.format(&self.value);
        } else {
            self.value.push(key);
        }
    }

    pub fn type_str(&mut self, text: &str) {
        for key in text.chars() {
            self.push_key(key);
        }
    }

    /// Programmatic assignment. Bypasses mask and length limit, like
    /// setting `.value` on a DOM input.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Multi-line text control.
#[derive(Debug, Clone, PartialEq)]
pub struct TextArea {
    pub name: String,
    pub placeholder: String,
    pub value: String,
}

impl TextArea {
    fn render(question: &Question) -> Self {
        Self {
            name: question.name.clone(),
            placeholder: question.placeholder.clone(),
            value: String::new(),
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Single-select control. The first rendered option is the sentinel
/// "nothing selected" entry (value `-1`, label from the field's mask).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectControl {
    pub name: String,
    pub placeholder: String,
    pub options: Vec<SelectOption>,
    pub value: String,
}

impl SelectControl {
    fn render(question: &Question, placeholder: &str, options: &[EnumOption]) -> Self {
        Self {
            name: question.name.clone(),
            placeholder: placeholder.to_string(),
            options: options
                .iter()
                .map(|option| SelectOption {
                    value: option.key.clone(),
                    label: option.label.clone(),
                })
                .collect(),
            value: UNSELECTED.to_string(),
        }
    }

    /// Picks an option by value. A value matching no option resets to
    /// the sentinel, the closest analog of a select with no selection.
    pub fn select(&mut self, value: &str) {
        if value == UNSELECTED || self.options.iter().any(|option| option.value == value) {
            self.value = value.to_string();
        } else {
            self.value = UNSELECTED.to_string();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub name: String,
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Checkbox group; all boxes share the field's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGroup {
    pub name: String,
    pub boxes: Vec<Checkbox>,
}

impl CheckboxGroup {
    fn render(question: &Question, options: &[EnumOption]) -> Self {
        Self {
            name: question.name.clone(),
            boxes: options
                .iter()
                .map(|option| Checkbox {
                    name: question.name.clone(),
                    value: option.key.clone(),
                    label: option.label.clone(),
                    checked: false,
                })
                .collect(),
        }
    }

    /// Returns false when no box carries the value.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        match self.boxes.iter_mut().find(|b| b.value == value) {
            Some(b) => {
                b.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn any_checked(&self) -> bool {
        self.boxes.iter().any(|b| b.checked)
    }

    /// Values of checked boxes, in render order.
    pub fn checked_values(&self) -> Vec<String> {
        self.boxes
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.value.clone())
            .collect()
    }
}

/// The rendered answer control of one question.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerNode {
    Text(TextInput),
    TextArea(TextArea),
    Select(SelectControl),
    Checkboxes(CheckboxGroup),
    /// Unrecognized field type: defined but empty, never a crash.
    Empty,
}

impl AnswerNode {
    /// Answer node factory: dispatches on the resolved field kind.
    pub fn render(question: &Question) -> AnswerNode {
        match &question.kind {
            FieldKind::SmallText | FieldKind::Email => {
                AnswerNode::Text(TextInput::render(question, false, None))
            }
            FieldKind::LatLng => AnswerNode::Text(TextInput::render(question, true, None)),
            FieldKind::Phone { mask } => {
                AnswerNode::Text(TextInput::render(question, true, Some(mask.clone())))
            }
            FieldKind::BigText => AnswerNode::TextArea(TextArea::render(question)),
            FieldKind::EnumerableSingle {
                placeholder,
                options,
            } => AnswerNode::Select(SelectControl::render(question, placeholder, options)),
            FieldKind::EnumerableMulti { options } => {
                AnswerNode::Checkboxes(CheckboxGroup::render(question, options))
            }
            FieldKind::Unsupported => AnswerNode::Empty,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AnswerNode::Text(input) => Some(&input.name),
            AnswerNode::TextArea(area) => Some(&area.name),
            AnswerNode::Select(select) => Some(&select.name),
            AnswerNode::Checkboxes(group) => Some(&group.name),
            AnswerNode::Empty => None,
        }
    }
}

/// Inline validation message attached under a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    pub message: String,
}

/// One question container: title, answer control, optional error.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionNode {
    pub question: Question,
    pub answer: AnswerNode,
    pub error: Option<ErrorNode>,
}

impl QuestionNode {
    pub fn render(question: Question) -> QuestionNode {
        let answer = AnswerNode::render(&question);
        QuestionNode {
            question,
            answer,
            error: None,
        }
    }

    /// Attaches the error, replacing any existing one. At most one
    /// error node exists per question.
    pub fn attach_error(&mut self, message: impl Into<String>) {
        self.error = Some(ErrorNode {
            message: message.into(),
        });
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub text: String,
}

/// One page's form: questions in schema order plus the submit control.
#[derive(Debug, Clone, PartialEq)]
pub struct FormNode {
    pub questions: Vec<QuestionNode>,
    pub button: SubmitButton,
}

impl FormNode {
    pub fn render(questions: &[Question], button_text: &str) -> FormNode {
        FormNode {
            questions: questions
                .iter()
                .cloned()
                .map(QuestionNode::render)
                .collect(),
            button: SubmitButton {
                text: button_text.to_string(),
            },
        }
    }

    pub fn question(&self, name: &str) -> Option<&QuestionNode> {
        self.questions.iter().find(|q| q.question.name == name)
    }

    pub fn question_mut(&mut self, name: &str) -> Option<&mut QuestionNode> {
        self.questions.iter_mut().find(|q| q.question.name == name)
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_text_input(input: &TextInput) -> String {
    let mut class = "briefing-questionText".to_string();
    if input.small {
        class.push_str(" --small");
    }

    let mut attrs = format!(
        " placeholder=\"{}\" name=\"{}\" type=\"text\" class=\"{}\"",
        escape_html(&input.placeholder),
        escape_html(&input.name),
        class
    );
    if let Some(mask) = &input.mask {
        attrs.push_str(&format!(" maxlength=\"{}\"", mask.max_len()));
    }
    if !input.value.is_empty() {
        attrs.push_str(&format!(" value=\"{}\"", escape_html(&input.value)));
    }

    format!("<input{attrs}>")
}

fn render_textarea(area: &TextArea) -> String {
    format!(
        "<textarea placeholder=\"{}\" name=\"{}\" class=\"briefing-questionTextarea\">{}</textarea>",
        escape_html(&area.placeholder),
        escape_html(&area.name),
        escape_html(&area.value)
    )
}

fn render_select(select: &SelectControl) -> String {
    let mut options = format!(
        "<option value=\"{}\"{}>{}</option>",
        UNSELECTED,
        if select.value == UNSELECTED {
            " selected"
        } else {
            ""
        },
        escape_html(&select.placeholder)
    );
    for option in &select.options {
        let selected = if select.value == option.value {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            escape_html(&option.value),
            selected,
            escape_html(&option.label)
        ));
    }

    format!(
        "<select name=\"{}\" class=\"briefing-questionSelect\">{}</select>",
        escape_html(&select.name),
        options
    )
}

fn render_checkboxes(group: &CheckboxGroup) -> String {
    let mut items = String::new();
    for b in &group.boxes {
        let checked = if b.checked { " checked" } else { "" };
        items.push_str(&format!(
            "<li class=\"briefing-questionOption\"><label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{}><span>{}</span></label></li>",
            escape_html(&b.name),
            escape_html(&b.value),
            checked,
            escape_html(&b.label)
        ));
    }
    format!("<ul>{items}</ul>")
}

pub fn render_answer(answer: &AnswerNode) -> String {
    match answer {
        AnswerNode::Text(input) => render_text_input(input),
        AnswerNode::TextArea(area) => render_textarea(area),
        AnswerNode::Select(select) => render_select(select),
        AnswerNode::Checkboxes(group) => render_checkboxes(group),
        AnswerNode::Empty => String::new(),
    }
}

pub fn render_question(node: &QuestionNode) -> String {
    let class = if node.is_invalid() {
        "briefing-question _isInvalid"
    } else {
        "briefing-question"
    };

    let mut body = format!(
        "<label class=\"briefing-questionTitle\">{}</label>{}",
        escape_html(&node.question.label),
        render_answer(&node.answer)
    );
    if let Some(error) = &node.error {
        body.push_str(&format!(
            "<span class=\"briefing-questionError\">{}</span>",
            escape_html(&error.message)
        ));
    }

    format!("<section class=\"{class}\">{body}</section>")
}

pub fn render_form(form: &FormNode) -> String {
    let mut body = String::new();
    for node in &form.questions {
        body.push_str(&render_question(node));
    }
    body.push_str(&format!(
        "<button class=\"briefing-finish\">{}</button>",
        escape_html(&form.button.text)
    ));

    format!("<fieldset class=\"briefing-questionsContainer\">{body}</fieldset>")
}
