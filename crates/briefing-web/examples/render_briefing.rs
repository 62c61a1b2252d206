use briefing_core::{FormPage, FormSchema};
use briefing_web::{FormController, FormCreatorConfig, render_page};
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), String> {
    let document = include_str!("fields.json");
    let schema = FormSchema::from_document(document).map_err(|e| e.to_string())?;
    let mut controller = FormController::new(&schema, FormCreatorConfig::default());

    let out_dir = std::env::var("BRIEFING_EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp/briefing-form"));
    fs::create_dir_all(&out_dir)
        .map_err(|e| format!("failed to create export dir {}: {e}", out_dir.display()))?;

    controller.set_page(FormPage::Request);
    let request = out_dir.join("request.html");
    fs::write(&request, render_page(&controller))
        .map_err(|e| format!("failed to write {}: {e}", request.display()))?;

    controller.set_page(FormPage::User);
    let user = out_dir.join("user.html");
    fs::write(&user, render_page(&controller))
        .map_err(|e| format!("failed to write {}: {e}", user.display()))?;

    println!("wrote {}", request.display());
    println!("wrote {}", user.display());
    Ok(())
}
