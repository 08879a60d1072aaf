use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use futures::StreamExt;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::diff_mode::DiffMode;
use crate::errors::{LexlineError, LexlineResult};
use crate::helpers::context_builder::build_context_text;
use crate::logger::animated_logger::AnimatedLogger;
use crate::logger::redline_logger::RedlineLogger;
use crate::services::assistant::DraftAssistant;
use crate::services::autosaver::Autosaver;
use crate::services::change_applier::ChangeApplier;
use crate::services::draft_api::DraftApiClient;
use crate::services::editor_controller::EditorController;
use crate::services::line_diff::create_line_diff;
use crate::services::word_diff::create_word_diff;
use crate::structs::assistant_reply::AssistantReply;
use crate::structs::change_descriptor::ChangeDescriptor;
use crate::structs::config::config::Config;
use crate::structs::editor_state::EditorState;
use crate::structs::validation_report::ValidationReport;
use crate::ui::markup_renderer::MarkupRenderer;
use crate::ui::review_server::ReviewServer;
use crate::ui::session_manager::SessionManager;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> LexlineResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Chat { draft, message, save } => self.chat_command(draft, message, save).await,
            Commands::Diff { original, modified, mode } => self.diff_command(original, modified, mode),
            Commands::Apply { draft, changes, output } => self.apply_command(draft, changes, output),
            Commands::Validate { draft, changes } => self.validate_command(draft, changes),
            Commands::Review { draft, changes, draft_id, timeout } => {
                self.review_command(draft, changes, draft_id, timeout).await
            }
            Commands::Compile { draft, draft_id, output } => {
                self.compile_command(draft, draft_id, output).await
            }
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> LexlineResult<()> {
        log::info!("🚀 Initializing lexline configuration...");

        match ConfigManager::create_sample_config() {
            Ok(()) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("📝 Edit the configuration file to point at your draft backend.");
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn chat_command(&self, draft: PathBuf, message: String, save: Option<PathBuf>) -> LexlineResult<()> {
        let config = self.load_config()?;
        let draft_text = Self::read_draft(&draft)?;
        let context_text = build_context_text(&draft_text, config.editor.max_context_chars);

        let api_key = config
            .api
            .api_key_env
            .as_ref()
            .and_then(|env| std::env::var(env).ok());
        let assistant = DraftAssistant::new(config.api.base_url.clone(), api_key);

        use crate::traits::assistant_provider::AssistantProvider;
        let mut stream = assistant.stream_chat(message, context_text, Vec::new()).await?;

        let mut reply = AssistantReply::default();

        while let Some(item) = stream.next().await {
            let item = item?;

            if !item.content.is_empty() {
                print!("{}", item.content);
                let _ = std::io::stdout().flush();
                reply.summary.push_str(&item.content);
            }

            if let Some(change) = item.suggestion {
                reply.suggestions.push(change);
            }

            if item.is_complete {
                reply.confidence = item.confidence.or(reply.confidence);
            }
        }
        println!();

        RedlineLogger::print_reply_report(&reply);
        for change in &reply.suggestions {
            RedlineLogger::print_change_report(&draft_text, change);
        }

        if let Some(save_path) = save {
            let json = serde_json::to_string_pretty(&reply.suggestions)?;
            fs::write(&save_path, json)?;
            log::info!("💾 {} suggestions written to {}", reply.suggestions.len(), save_path.display());
        }

        Ok(())
    }

    fn diff_command(&self, original: PathBuf, modified: PathBuf, mode: DiffMode) -> LexlineResult<()> {
        let original_text = Self::read_draft(&original)?;
        let modified_text = Self::read_draft(&modified)?;

        println!("{}", MarkupRenderer::rule());
        match mode {
            DiffMode::Line => {
                let segments = create_line_diff(&original_text, &modified_text);
                print!("{}", MarkupRenderer::render_lines_ansi(&segments));
                println!("{}", MarkupRenderer::rule());
                println!("{}", MarkupRenderer::render_legend(&segments));
            }
            DiffMode::Word => {
                let segments = create_word_diff(&original_text, &modified_text);
                println!("{}", MarkupRenderer::render_inline_ansi(&segments));
                println!("{}", MarkupRenderer::rule());
                println!("{}", MarkupRenderer::render_legend(&segments));
            }
        }

        Ok(())
    }

    fn apply_command(&self, draft: PathBuf, changes: PathBuf, output: Option<PathBuf>) -> LexlineResult<()> {
        let draft_text = Self::read_draft(&draft)?;
        let descriptors = Self::read_changes(&changes)?;

        log::info!("📁 Applying {} changes to {}", descriptors.len(), draft.display());

        let mut state = EditorState::new(&draft_text);
        EditorController::ingest_changes(&mut state, descriptors);

        let outcome = EditorController::apply_all_changes(&mut state);
        outcome.print_summary();

        let segments = EditorController::markup_segments(&state);
        println!("{}", MarkupRenderer::rule());
        println!("{}", MarkupRenderer::render_inline_ansi(&segments));
        println!("{}", MarkupRenderer::rule());
        println!("{}", MarkupRenderer::render_legend(&segments));

        let target = output.unwrap_or(draft);
        fs::write(&target, &state.current_text)?;
        log::info!("✅ Modified draft written to {}", target.display());

        Ok(())
    }

    fn validate_command(&self, draft: PathBuf, changes: PathBuf) -> LexlineResult<()> {
        let draft_text = Self::read_draft(&draft)?;
        let descriptors = Self::read_changes(&changes)?;

        let mut combined = ValidationReport { is_valid: true, ..Default::default() };

        for change in &descriptors {
            let report = ChangeApplier::validate(&draft_text, change);
            combined.is_valid &= report.is_valid;
            combined.errors.extend(report.errors);
            combined.warnings.extend(report.warnings);
        }

        combined.print_summary();

        if !combined.is_valid {
            return Err(LexlineError::change_error(
                "batch",
                "one or more changes failed validation",
            ));
        }

        Ok(())
    }

    async fn review_command(
        &self,
        draft: PathBuf,
        changes: PathBuf,
        draft_id: Option<String>,
        timeout: u64,
    ) -> LexlineResult<()> {
        let config = self.load_config()?;
        let draft_text = Self::read_draft(&draft)?;
        let descriptors = Self::read_changes(&changes)?;

        let document_name = draft
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "draft".to_string());

        let session_manager = Arc::new(SessionManager::new());
        let session_id = session_manager.create_session(&document_name, &draft_text, descriptors);

        let mut server = ReviewServer::new(Arc::clone(&session_manager));
        let mut autosaver = self.build_autosaver(&config, &session_manager, &session_id, draft_id)?;

        if let Some(autosaver) = autosaver.as_mut() {
            server = server.with_autosave(autosaver.dirty_handle());
            autosaver.start();
        }

        let port = server.start().await?;
        let url = format!("http://127.0.0.1:{}/?session={}", port, session_id);

        log::info!("🔍 Review your changes at {}", url);
        if webbrowser::open(&url).is_err() {
            log::warn!("⚠️ Could not open a browser - visit the URL manually");
        }

        let final_text = server.wait_for_completion(&session_id, timeout).await?;

        if let Some(autosaver) = autosaver.as_mut() {
            autosaver.stop().await;
        }
        server.shutdown().await?;

        match final_text {
            Some(text) => {
                fs::write(&draft, &text)?;
                log::info!("✅ Reviewed draft written to {}", draft.display());
            }
            None => {
                log::info!("⏭️ Review ended without applying changes - draft untouched");
            }
        }

        Ok(())
    }

    async fn compile_command(&self, draft: PathBuf, draft_id: String, output: PathBuf) -> LexlineResult<()> {
        let config = self.load_config()?;
        let draft_text = Self::read_draft(&draft)?;
        let client = DraftApiClient::new(&config.api)?;

        let mut spinner = AnimatedLogger::new("📄 Compiling document");
        spinner.start();

        match client.compile_document(&draft_id, &draft_text).await {
            Ok(bytes) => {
                spinner.stop("Document compiled").await;
                fs::write(&output, bytes)?;
                log::info!("✅ Compiled document written to {}", output.display());
                Ok(())
            }
            Err(e) => {
                spinner.error(&e.user_message()).await;
                Err(e)
            }
        }
    }

    fn build_autosaver(
        &self,
        config: &Config,
        session_manager: &Arc<SessionManager>,
        session_id: &str,
        draft_id: Option<String>,
    ) -> LexlineResult<Option<Autosaver>> {
        let Some(draft_id) = draft_id else {
            return Ok(None);
        };

        let client = DraftApiClient::new(&config.api)?;
        Ok(Some(Autosaver::new(
            Arc::new(client),
            Arc::clone(session_manager),
            session_id,
            &draft_id,
            config.editor.autosave_debounce_ms,
        )))
    }

    fn load_config(&self) -> LexlineResult<Config> {
        let config = match ConfigManager::load() {
            Ok(config) => config,
            Err(e) => {
                log::error!("❌ Failed to load configuration: {}", e);
                log::error!("💡 Run 'lexline init' to create a configuration file.");
                return Err(e);
            }
        };

        ConfigManager::validate_config(&config)?;
        Ok(config)
    }

    fn read_draft(path: &Path) -> LexlineResult<String> {
        fs::read_to_string(path).map_err(|e| {
            LexlineError::draft_error(&path.display().to_string(), "read", &e.to_string())
        })
    }

    fn read_changes(path: &Path) -> LexlineResult<Vec<ChangeDescriptor>> {
        let content = fs::read_to_string(path).map_err(|e| {
            LexlineError::draft_error(&path.display().to_string(), "read changes", &e.to_string())
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
