use briefing_core::{FieldKind, FormSchema, Question};
use std::fs;

fn main() {
    let path = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("Usage: inspect_fields <fields.json>");
            eprintln!("  e.g. cargo run -p briefing-core --example inspect_fields -- fields.json");
            std::process::exit(1);
        }
    };

    let source = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("read {path}: {e}");
            std::process::exit(1);
        }
    };

    let schema = match FormSchema::from_document(&source) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("parse {path}: {} - {}", e.code, e.message);
            std::process::exit(1);
        }
    };

    for (page, fields) in [
        ("request", &schema.request_fields),
        ("user", &schema.user_fields),
    ] {
        println!("[{page}]");
        for question in Question::resolve_all(fields) {
            let kind = match &question.kind {
                FieldKind::SmallText => "small_text".to_string(),
                FieldKind::BigText => "big_text".to_string(),
                FieldKind::LatLng => "lat_lng".to_string(),
                FieldKind::Email => "email".to_string(),
                FieldKind::Phone { mask } => format!("phone maxlen={}", mask.max_len()),
                FieldKind::EnumerableSingle { options, .. } => {
                    format!("select ({} options)", options.len())
                }
                FieldKind::EnumerableMulti { options } => {
                    format!("checkboxes ({} options)", options.len())
                }
                FieldKind::Unsupported => "unsupported".to_string(),
            };
            println!("  {} {} required={}", question.name, kind, question.required);
        }
    }
}
