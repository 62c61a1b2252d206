use crate::form::{AnswerNode, FormNode, QuestionNode};
use briefing_core::answer::{AnswerMap, AnswerValue};
use briefing_core::rules::{
    UNSELECTED, check_email, check_multi_choice, check_single_choice, check_text,
};
use briefing_core::schema::FieldKind;

/// Validates one question against its rendered control.
///
/// Any prior error node is removed first, so repeated validation with
/// unchanged input is idempotent and leaves at most one error node.
pub fn validate_question(node: &mut QuestionNode) -> bool {
    node.clear_error();

    if !node.question.required {
        return true;
    }

    let failure = match (&node.question.kind, &node.answer) {
        (FieldKind::Email, AnswerNode::Text(input)) => check_email(&input.value),
        (kind, AnswerNode::Text(input)) if kind.is_text_like() => check_text(&input.value),
        (FieldKind::BigText, AnswerNode::TextArea(area)) => check_text(&area.value),
        (FieldKind::EnumerableSingle { .. }, AnswerNode::Select(select)) => {
            check_single_choice(&select.value)
        }
        (FieldKind::EnumerableMulti { .. }, AnswerNode::Checkboxes(group)) => {
            check_multi_choice(group.any_checked())
        }
        _ => None,
    };

    match failure {
        Some(message) => {
            node.attach_error(message);
            false
        }
        None => true,
    }
}

/// Reads the current answer back from a rendered question. Never
/// mutates and never fails; unset values degrade to [`AnswerValue::Null`].
pub fn extract_answer(node: &QuestionNode) -> AnswerValue {
    match &node.answer {
        AnswerNode::Text(input) => AnswerValue::Text(input.value.clone()),
        AnswerNode::TextArea(area) => AnswerValue::Text(area.value.clone()),
        AnswerNode::Select(select) => {
            if select.value == UNSELECTED {
                AnswerValue::Null
            } else {
                AnswerValue::Choice(select.value.clone())
            }
        }
        AnswerNode::Checkboxes(group) => {
            let checked = group.checked_values();
            if checked.is_empty() {
                AnswerValue::Null
            } else {
                AnswerValue::Choices(checked)
            }
        }
        AnswerNode::Empty => AnswerValue::Null,
    }
}

impl FormNode {
    /// Fresh answer map over every question of this page, keyed by
    /// field name.
    pub fn answers(&self) -> AnswerMap {
        self.questions
            .iter()
            .map(|node| (node.question.name.clone(), extract_answer(node)))
            .collect()
    }

    /// Validates every question on the page; all of them are checked
    /// and surfaced, no short-circuit on the first failure.
    pub fn validate(&mut self) -> bool {
        let mut all_valid = true;
        for node in self.questions.iter_mut() {
            let ok = validate_question(node);
            all_valid = all_valid && ok;
        }
        all_valid
    }
}
