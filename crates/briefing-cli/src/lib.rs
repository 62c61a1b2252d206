use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use briefing_core::page::FormPage;
use briefing_core::schema::FormSchema;
use briefing_web::controller::{FormController, FormCreatorConfig};
use briefing_web::form::{AnswerNode, FormNode};
use briefing_web::render_page;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum CliCommand {
    Render {
        file: PathBuf,
        page: FormPage,
        out: Option<PathBuf>,
    },
    Serve {
        file: PathBuf,
        port: u16,
    },
    Check {
        file: PathBuf,
        answers: Option<String>,
    },
}

pub async fn run_from_env() -> Result<(), String> {
    run_from_args(env::args().skip(1).collect()).await
}

pub async fn run_from_args(args: Vec<String>) -> Result<(), String> {
    let command = parse_command(args)?;

    match command {
        CliCommand::Render { file, page, out } => run_render(file, page, out),
        CliCommand::Serve { file, port } => run_serve(file, port).await,
        CliCommand::Check { file, answers } => run_check(file, answers),
    }
}

fn parse_command(args: Vec<String>) -> Result<CliCommand, String> {
    if args.is_empty() {
        return Err(help_text());
    }

    let cmd = args[0].as_str();
    match cmd {
        "render" => parse_render(args),
        "serve" => parse_serve(args),
        "check" => parse_check(args),
        "help" | "--help" | "-h" => Err(help_text()),
        _ => Err(format!("unknown command: {cmd}\n\n{}", help_text())),
    }
}

fn parse_render(args: Vec<String>) -> Result<CliCommand, String> {
    let mut file: Option<PathBuf> = None;
    let mut page = FormPage::Request;
    let mut out: Option<PathBuf> = None;

    let mut i = 1usize;
    while i < args.len() {
        let token = &args[i];
        match token.as_str() {
            "--page" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| "--page requires a value".to_string())?;
                page = FormPage::parse(value).map_err(|e| e.to_string())?;
            }
            "--out" => {
                i += 1;
                out = Some(PathBuf::from(
                    args.get(i)
                        .ok_or_else(|| "--out requires a value".to_string())?,
                ));
            }
            x if x.starts_with("--") => return Err(format!("unknown flag: {x}")),
            _ => {
                if file.is_some() {
                    return Err("only one FILE positional argument is allowed".to_string());
                }
                file = Some(PathBuf::from(token));
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "render requires FILE".to_string())?;
    Ok(CliCommand::Render { file, page, out })
}

fn parse_serve(args: Vec<String>) -> Result<CliCommand, String> {
    let mut file: Option<PathBuf> = None;
    let mut port: u16 = 8080;

    let mut i = 1usize;
    while i < args.len() {
        let token = &args[i];
        match token.as_str() {
            "--port" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| "--port requires a value".to_string())?;
                port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port: {value}"))?;
            }
            x if x.starts_with("--") => return Err(format!("unknown flag: {x}")),
            _ => {
                if file.is_some() {
                    return Err("only one FILE positional argument is allowed".to_string());
                }
                file = Some(PathBuf::from(token));
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "serve requires FILE".to_string())?;
    Ok(CliCommand::Serve { file, port })
}

fn parse_check(args: Vec<String>) -> Result<CliCommand, String> {
    let mut file: Option<PathBuf> = None;
    let mut answers: Option<String> = None;

    let mut i = 1usize;
    while i < args.len() {
        let token = &args[i];
        match token.as_str() {
            "--answers" => {
                i += 1;
                answers = Some(
                    args.get(i)
                        .ok_or_else(|| "--answers requires a value".to_string())?
                        .to_string(),
                );
            }
            x if x.starts_with("--") => return Err(format!("unknown flag: {x}")),
            _ => {
                if file.is_some() {
                    return Err("only one FILE positional argument is allowed".to_string());
                }
                file = Some(PathBuf::from(token));
            }
        }
        i += 1;
    }

    let file = file.ok_or_else(|| "check requires FILE".to_string())?;
    Ok(CliCommand::Check { file, answers })
}

fn help_text() -> String {
    [
        "briefing CLI",
        "",
        "Commands:",
        "  briefing render FILE [--page request|user] [--out PATH]",
        "  briefing serve FILE [--port 8080]",
        "  briefing check FILE [--answers JSON_OR_PATH]",
    ]
    .join("\n")
}

fn load_controller(file: &PathBuf) -> Result<FormController, String> {
    let source =
        fs::read_to_string(file).map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    let schema = FormSchema::from_document(&source).map_err(|e| e.to_string())?;
    Ok(FormController::new(&schema, FormCreatorConfig::default()))
}

fn run_render(file: PathBuf, page: FormPage, out: Option<PathBuf>) -> Result<(), String> {
    let mut controller = load_controller(&file)?;
    controller.set_page(page);
    let html = render_page(&controller);

    match out {
        Some(path) => {
            fs::write(&path, html)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            println!("wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

#[derive(Clone)]
struct ServeState {
    request_html: String,
    user_html: String,
    fields: Value,
}

async fn run_serve(file: PathBuf, port: u16) -> Result<(), String> {
    let source =
        fs::read_to_string(&file).map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    let fields: Value = serde_json::from_str(&source)
        .map_err(|e| format!("invalid JSON in {}: {e}", file.display()))?;
    let schema = FormSchema::from_document(&source).map_err(|e| e.to_string())?;

    let mut controller = FormController::new(&schema, FormCreatorConfig::default());
    controller.set_page(FormPage::Request);
    let request_html = render_page(&controller);
    controller.set_page(FormPage::User);
    let user_html = render_page(&controller);

    let state = Arc::new(ServeState {
        request_html,
        user_html,
        fields,
    });

    let app = Router::new()
        .route("/", get(route_request))
        .route("/user", get(route_user))
        .route("/fields.json", get(route_fields))
        .with_state(state);

    let host = format!("0.0.0.0:{port}");
    println!("briefing serve");
    println!("File: {}", file.display());
    println!("URL:  http://localhost:{port}");

    let listener = tokio::net::TcpListener::bind(&host)
        .await
        .map_err(|e| format!("failed to bind {host}: {e}"))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server failed: {e}"))?;

    Ok(())
}

async fn route_request(State(state): State<Arc<ServeState>>) -> Html<String> {
    Html(state.request_html.clone())
}

async fn route_user(State(state): State<Arc<ServeState>>) -> Html<String> {
    Html(state.user_html.clone())
}

async fn route_fields(State(state): State<Arc<ServeState>>) -> Json<Value> {
    Json(state.fields.clone())
}

fn load_answers_payload(answers: Option<String>) -> Result<Option<Value>, String> {
    let Some(input) = answers else {
        return Ok(None);
    };

    let as_path = PathBuf::from(&input);
    if as_path.exists() {
        let content = fs::read_to_string(&as_path)
            .map_err(|e| format!("failed to read {}: {e}", as_path.display()))?;
        let parsed = serde_json::from_str::<Value>(&content)
            .map_err(|e| format!("invalid JSON in {}: {e}", as_path.display()))?;
        return Ok(Some(parsed));
    }

    let parsed = serde_json::from_str::<Value>(&input)
        .map_err(|e| format!("invalid --answers JSON: {e}"))?;
    Ok(Some(parsed))
}

/// Drives rendered controls from an answers document: strings land in
/// text and select controls, arrays tick checkbox groups.
fn fill_form(form: &mut FormNode, values: &serde_json::Map<String, Value>) -> Result<(), String> {
    for (name, value) in values {
        let node = form
            .question_mut(name)
            .ok_or_else(|| format!("unknown field: {name}"))?;

        match (&mut node.answer, value) {
            (AnswerNode::Text(input), Value::String(s)) => input.set_value(s.clone()),
            (AnswerNode::TextArea(area), Value::String(s)) => area.set_value(s.clone()),
            (AnswerNode::Select(select), Value::String(s)) => select.select(s),
            (AnswerNode::Checkboxes(group), Value::Array(items)) => {
                for item in items {
                    let key = item
                        .as_str()
                        .ok_or_else(|| format!("field {name}: checkbox values must be strings"))?;
                    if !group.set_checked(key, true) {
                        return Err(format!("field {name}: no option '{key}'"));
                    }
                }
            }
            (AnswerNode::Empty, _) => {}
            (_, other) => return Err(format!("field {name}: unsupported value {other}")),
        }
    }
    Ok(())
}

fn run_check(file: PathBuf, answers: Option<String>) -> Result<(), String> {
    let mut controller = load_controller(&file)?;

    if let Some(payload) = load_answers_payload(answers)? {
        if let Some(request) = payload.get("request").and_then(|v| v.as_object()) {
            fill_form(controller.form_mut(FormPage::Request), request)?;
        }
        if let Some(user) = payload.get("user").and_then(|v| v.as_object()) {
            fill_form(controller.form_mut(FormPage::User), user)?;
        }
    }

    let mut invalid = 0usize;
    for page in [FormPage::Request, FormPage::User] {
        controller.set_page(page);
        if !controller.validate_current_page() {
            for node in &controller.form(page).questions {
                if let Some(error) = &node.error {
                    println!(
                        "error {}.{} - {}",
                        page.as_str(),
                        node.question.name,
                        error.message
                    );
                    invalid += 1;
                }
            }
        }
    }

    if invalid > 0 {
        return Err(format!("{invalid} invalid answer(s)"));
    }

    let pretty =
        serde_json::to_string_pretty(&controller.answers()).map_err(|e| e.to_string())?;
    println!("{pretty}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_render_defaults() {
        let cmd = parse_command(args("render fields.json")).unwrap();
        match cmd {
            CliCommand::Render { file, page, out } => {
                assert_eq!(file, PathBuf::from("fields.json"));
                assert_eq!(page, FormPage::Request);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_render_flags() {
        let cmd = parse_command(args("render fields.json --page user --out form.html")).unwrap();
        match cmd {
            CliCommand::Render { page, out, .. } => {
                assert_eq!(page, FormPage::User);
                assert_eq!(out, Some(PathBuf::from("form.html")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_render_rejects_bad_page() {
        assert!(parse_command(args("render fields.json --page admin")).is_err());
    }

    #[test]
    fn test_parse_serve_port() {
        let cmd = parse_command(args("serve fields.json --port 3000")).unwrap();
        match cmd {
            CliCommand::Serve { port, .. } => assert_eq!(port, 3000),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(parse_command(args("serve fields.json --port nope")).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_flag_and_command() {
        assert!(parse_command(args("render fields.json --watch")).is_err());
        assert!(parse_command(args("build fields.json")).is_err());
        assert!(parse_command(Vec::new()).is_err());
    }

    #[test]
    fn test_load_answers_payload_inline_json() {
        let payload = load_answers_payload(Some(r#"{"request":{"city":"Recife"}}"#.into()))
            .unwrap()
            .unwrap();
        assert_eq!(payload["request"]["city"], "Recife");
        assert!(load_answers_payload(Some("not json".into())).is_err());
        assert!(load_answers_payload(None).unwrap().is_none());
    }

    #[test]
    fn test_fill_form_drives_controls() {
        let schema = FormSchema::from_json(
            r#"{
                "request_fields": [
                    { "name": "city", "label": "Cidade", "type": "small_text", "required": true },
                    { "name": "size", "label": "Tamanho", "type": "enumerable",
                      "allow_multiple_value": true, "values": { "1": "1", "2": "2" } }
                ],
                "user_fields": []
            }"#,
        )
        .unwrap();
        let mut controller = FormController::new(&schema, FormCreatorConfig::default());

        let payload: Value =
            serde_json::from_str(r#"{"city":"Recife","size":["1","2"]}"#).unwrap();
        fill_form(
            controller.form_mut(FormPage::Request),
            payload.as_object().unwrap(),
        )
        .unwrap();

        assert!(controller.form_mut(FormPage::Request).validate());

        let answers = controller.form(FormPage::Request).answers();
        assert_eq!(
            serde_json::to_value(&answers).unwrap(),
            serde_json::json!({ "city": "Recife", "size": ["1", "2"] })
        );
    }

    #[test]
    fn test_fill_form_rejects_unknown_field() {
        let schema = FormSchema::from_json(r#"{"request_fields":[],"user_fields":[]}"#).unwrap();
        let mut controller = FormController::new(&schema, FormCreatorConfig::default());

        let payload: Value = serde_json::from_str(r#"{"ghost":"boo"}"#).unwrap();
        let err = fill_form(
            controller.form_mut(FormPage::Request),
            payload.as_object().unwrap(),
        )
        .unwrap_err();
        assert!(err.contains("unknown field"));
    }
}
