use anyhow::Context;
use clap::Parser;
use wiki_studio::app::form_view;
use wiki_studio::utils::error::ErrorSeverity;
use wiki_studio::utils::{logger, validation::Validate};
use wiki_studio::{CliConfig, Command, LocalStorage, SectionEditor, StudioError};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.storage.directory.clone(), config.storage.key.clone());
    tracing::debug!("Draft slot: {}", storage.slot_path().display());

    let mut editor = SectionEditor::new(storage, config.template())
        .with_catalog(config.catalog())
        .with_notice_duration(config.notice_duration());
    let outcome = editor.load_draft();
    tracing::debug!("Load outcome: {:?}", outcome);

    if let Err(e) = run(&mut editor, &cli.command) {
        match e.downcast_ref::<StudioError>() {
            Some(err) => {
                tracing::error!("❌ {} (Severity: {:?})", err, err.severity());
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());
                let exit_code = match err.severity() {
                    ErrorSeverity::Low => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                std::process::exit(exit_code);
            }
            None => return Err(e),
        }
    }

    Ok(())
}

fn run(editor: &mut SectionEditor<LocalStorage>, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Show => {}
        Command::Subject { name } => editor.set_subject_name(name.as_str()),
        Command::Add { name } => {
            if !editor.catalog().contains(name) {
                return Err(StudioError::ValidationError {
                    message: format!(
                        "'{}' is not in the {} catalog",
                        name,
                        editor.template().title()
                    ),
                }
                .into());
            }
            if !editor.available_sections().contains(name) {
                return Err(StudioError::ValidationError {
                    message: format!("'{}' is already in the draft", name),
                }
                .into());
            }
            let id = editor.add_section(name);
            println!("Added {} <{}>", name, id);
        }
        Command::Remove { id } => {
            if !editor.remove_section(id) {
                println!("Nothing removed: no removable section <{}>", id);
            }
        }
        Command::Move { index, direction } => {
            if !editor.move_section(*index, *direction) {
                println!("Section {} cannot move {:?}", index, direction);
            }
        }
        Command::Edit { id, text, file } => {
            let content = match (text, file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| format!("reading section content from {}", path))?,
                (None, None) => {
                    return Err(StudioError::ValidationError {
                        message: "provide the new content or --file".to_string(),
                    }
                    .into())
                }
            };
            if !editor.update_section_content(id, content) {
                println!("No section <{}>", id);
            }
        }
        Command::Available => {
            print!("{}", form_view::render_available(&editor.available_sections()));
            return Ok(());
        }
        Command::Preview => {
            editor.open_preview();
            println!("{}", editor.format_article_text());
            editor.close_preview();
            return Ok(());
        }
        Command::Save => {}
        Command::Reset => editor.reset(),
        Command::Templates => {
            print!("{}", form_view::render_templates());
            return Ok(());
        }
    }

    if command.mutates() {
        let notice = editor.save_draft()?;
        println!("✅ {}", notice.message);
    }

    print!("{}", form_view::render_form(editor.draft(), editor.template()));
    Ok(())
}
