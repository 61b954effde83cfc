//! Line-oriented terminal front-end
//!
//! Each input line is one user event. Rows are shown 1-based and map onto
//! session indices; errors are reported inline and the loop keeps going.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::backend::SceneBackend;
use crate::controller::SceneController;
use crate::frame::write_thumbnails;
use crate::i18n::{TaggedLabel, TextKey, Translator};
use crate::source::extract_video_id;
use crate::{ClientError, Result};

/// One user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze(String),
    List,
    /// 1-based rows
    Toggle(Vec<usize>),
    /// 1-based rows, cleared regardless of their current state
    Deselect(Vec<usize>),
    SelectAll,
    DeselectAll,
    Export,
    ExportAll,
    Lang(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or_else(|| "empty command".to_string())?;
        let rest: Vec<&str> = parts.collect();

        match verb.to_lowercase().as_str() {
            "analyze" | "a" => Ok(Command::Analyze(rest.join(" "))),
            "list" | "ls" => Ok(Command::List),
            "toggle" | "t" => row_args("toggle", &rest).map(Command::Toggle),
            "skip" | "deselect" => row_args("skip", &rest).map(Command::Deselect),
            "all" => Ok(Command::SelectAll),
            "none" => Ok(Command::DeselectAll),
            "export" | "download" => Ok(Command::Export),
            "export-all" | "download-all" => Ok(Command::ExportAll),
            "lang" => match rest.as_slice() {
                [code] => Ok(Command::Lang(code.to_string())),
                _ => Err("usage: lang <en|vi|ar|ar-ma>".to_string()),
            },
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

fn row_args(verb: &str, rest: &[&str]) -> std::result::Result<Vec<usize>, String> {
    if rest.is_empty() {
        return Err(format!("{} needs at least one row number", verb));
    }
    rest.iter().map(|r| parse_row(r)).collect()
}

/// Parse a 1-based row number
pub fn parse_row(raw: &str) -> std::result::Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(format!("'{}' is not a row number", raw)),
    }
}

/// Parse a comma separated list of 1-based rows, e.g. `1,3`
pub fn parse_rows(raw: &str) -> std::result::Result<Vec<usize>, String> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_row)
        .collect()
}

/// Terminal session bound to one controller
pub struct Repl<B: SceneBackend> {
    controller: SceneController<B>,
    translator: Translator,
    labels: Vec<TaggedLabel>,
    output_dir: PathBuf,
    save_thumbnails: bool,
}

impl<B: SceneBackend> Repl<B> {
    pub fn new(controller: SceneController<B>, translator: Translator, output_dir: PathBuf) -> Self {
        let mut labels = vec![
            TaggedLabel::content(TextKey::Title),
            TaggedLabel::content(TextKey::Subtitle),
            TaggedLabel::placeholder(TextKey::UrlPlaceholder),
            TaggedLabel::content(TextKey::ResultsTitle),
            TaggedLabel::content(TextKey::VideoInfo),
        ];
        translator.apply(&mut labels);

        Self {
            controller,
            translator,
            labels,
            output_dir,
            save_thumbnails: false,
        }
    }

    pub fn with_thumbnails(mut self, enable: bool) -> Self {
        self.save_thumbnails = enable;
        self
    }

    pub fn controller(&self) -> &SceneController<B> {
        &self.controller
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    fn label(&self, key: TextKey) -> &str {
        self.labels
            .iter()
            .find(|l| l.content_key == Some(key))
            .map(|l| l.text.as_str())
            .unwrap_or_else(|| self.translator.text(key))
    }

    fn prompt(&self) -> &str {
        self.labels
            .iter()
            .find(|l| l.placeholder_key == Some(TextKey::UrlPlaceholder))
            .map(|l| l.placeholder.as_str())
            .unwrap_or_default()
    }

    pub fn header(&self) -> String {
        // RLM prefix for right-to-left copy
        let mark = if self.translator.language().is_rtl() { "\u{200F}" } else { "" };
        format!(
            "{mark}{}\n{mark}{}",
            self.label(TextKey::Title),
            self.label(TextKey::Subtitle)
        )
    }

    pub fn help(&self) -> String {
        let t = &self.translator;
        [
            format!("  analyze <url>   {}", t.text(TextKey::AnalyzeButton)),
            "  list            show scenes and selection".to_string(),
            "  toggle <n>...   flip selection of rows".to_string(),
            "  skip <n>...     deselect rows".to_string(),
            format!("  all             {}", t.text(TextKey::SelectAll)),
            format!("  none            {}", t.text(TextKey::DeselectAll)),
            format!("  export          {}", t.text(TextKey::DownloadSelected)),
            format!("  export-all      {}", t.text(TextKey::DownloadAll)),
            "  lang <code>     en, vi, ar, ar-ma".to_string(),
            "  quit".to_string(),
        ]
        .join("\n")
    }

    /// Scene table for the current session
    pub fn render(&self) -> String {
        let mut out = String::new();
        let Some(session) = self.controller.session() else {
            return out;
        };

        let _ = writeln!(
            out,
            "{}: {} ({})",
            self.label(TextKey::VideoInfo),
            extract_video_id(&session.source_url),
            session.analyzed_at.format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(
            out,
            "{} [{}/{}]",
            self.label(TextKey::ResultsTitle),
            session.selected_count(),
            session.len()
        );

        for (i, frame) in session.frames().iter().enumerate() {
            let mark = if session.is_selected(i) { "x" } else { " " };
            let _ = write!(out, "[{}] {:>3}  {:>6}", mark, i + 1, frame.display_timestamp());
            if let Some(clarity) = frame.clarity {
                let _ = write!(out, "  clarity {:.1}", clarity);
            }
            out.push('\n');
        }

        out
    }

    /// Run one command, returning the text to show
    pub async fn execute(&mut self, command: Command) -> Result<String> {
        debug!("Executing {:?}", command);

        match command {
            Command::Analyze(url) => {
                self.controller.analyze(&url).await?;
                if self.save_thumbnails {
                    if let Some(session) = self.controller.session() {
                        // The new session stands even if thumbnails cannot be written
                        match write_thumbnails(session.frames(), &self.output_dir).await {
                            Ok(written) => {
                                info!("🖼️  Wrote {} thumbnails to {}", written.len(), self.output_dir.display())
                            }
                            Err(e) => warn!("Could not write thumbnails to {}: {}", self.output_dir.display(), e),
                        }
                    }
                }
                Ok(self.render())
            }
            Command::List => Ok(self.render()),
            Command::Toggle(rows) => {
                self.check_rows(&rows)?;
                for row in rows {
                    self.controller.toggle(row - 1);
                }
                Ok(self.render())
            }
            Command::Deselect(rows) => {
                self.check_rows(&rows)?;
                for row in rows {
                    self.controller.deselect(row - 1);
                }
                Ok(self.render())
            }
            Command::SelectAll => {
                self.controller.select_all();
                Ok(self.render())
            }
            Command::DeselectAll => {
                self.controller.deselect_all();
                Ok(self.render())
            }
            Command::Export => {
                let archive = self.controller.export_selected().await?;
                let path = archive.save_to(&self.output_dir).await?;
                Ok(format!("{}: {}", self.translator.text(TextKey::DownloadSelected), path.display()))
            }
            Command::ExportAll => {
                let archive = self.controller.export_all().await?;
                let path = archive.save_to(&self.output_dir).await?;
                Ok(format!("{}: {}", self.translator.text(TextKey::DownloadAll), path.display()))
            }
            Command::Lang(code) => {
                self.translator.set_language(&code, &mut self.labels)?;
                Ok(self.header())
            }
            Command::Help => Ok(self.help()),
            Command::Quit => Ok(String::new()),
        }
    }

    fn check_rows(&self, rows: &[usize]) -> Result<()> {
        let count = self.controller.selectable_count();
        match rows.iter().find(|row| **row == 0 || **row > count) {
            Some(bad) => Err(ClientError::Validation(format!(
                "row {} does not exist ({} scenes)",
                bad, count
            ))),
            None => Ok(()),
        }
    }

    /// User-facing text for a failed command
    pub fn notification(&self, err: &ClientError) -> String {
        match err {
            ClientError::EmptySelection => self.translator.text(TextKey::NoSceneSelected).to_string(),
            other => other.to_string(),
        }
    }

    /// Read commands until `quit` or end of input.
    ///
    /// A bare URL is treated as `analyze <url>`.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", self.header())?;
        let mut lines = input.lines();

        loop {
            write!(out, "{} > ", self.prompt())?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let command = if line.contains("://") && !line.contains(' ') {
                Ok(Command::Analyze(line.to_string()))
            } else {
                line.parse::<Command>()
            };

            let command = match command {
                Ok(Command::Quit) => break,
                Ok(command) => command,
                Err(msg) => {
                    writeln!(out, "⚠️  {}", msg)?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(text) if text.is_empty() => {}
                Ok(text) => writeln!(out, "{}", text.trim_end())?,
                Err(e) => writeln!(out, "⚠️  {}", self.notification(&e))?,
            }
        }

        Ok(())
    }
}
