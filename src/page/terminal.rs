/// Terminal host for the CLI.
///
/// Alerts go to stderr in colour. Container writes go to stdout, or to
/// `<dir>/<container>.html` when an output directory is set, so the
/// fragments can be dropped straight into a page.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;

use super::{Container, Page};
use crate::logger::Logger;

#[derive(Debug, Clone)]
pub struct TerminalPage {
    out_dir: Option<PathBuf>,
    logger: Logger,
}

impl TerminalPage {
    pub fn new(out_dir: Option<PathBuf>, logger: Logger) -> Self {
        Self {
            out_dir,
            logger,
        }
    }

    /// Path a container is written to, when writing to files.
    pub fn container_path(&self, container: Container) -> Option<PathBuf> {
        self.out_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.html", container.id())))
    }

    fn write_file(&self, path: &Path, html: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)
    }
}

impl Page for TerminalPage {
    fn replace_contents(&mut self, container: Container, html: String) {
        match self.container_path(container) {
            Some(path) => match self.write_file(&path, &html) {
                Ok(()) => println!(
                    "{} {}",
                    format!("#{}", container.id()).bold().cyan(),
                    path.display()
                ),
                Err(e) => self
                    .logger
                    .error(&format!("failed writing {}: {e}", path.display())),
            },
            None => {
                println!("{}", format!("#{}", container.id()).bold().cyan());
                let mut stdout = std::io::stdout();
                let _ = writeln!(stdout, "{html}");
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{} {}", "!".bold().yellow(), message.yellow());
    }

    fn console_error(&mut self, message: &str) {
        self.logger.error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_paths_follow_ids() {
        let page = TerminalPage::new(Some(PathBuf::from("/tmp/out")), Logger::silent());
        assert_eq!(
            page.container_path(Container::Statistics),
            Some(PathBuf::from("/tmp/out/statistics.html"))
        );
        let page = TerminalPage::new(None, Logger::silent());
        assert_eq!(page.container_path(Container::Results), None);
    }

    #[test]
    fn writes_fragments_to_out_dir() {
        let dir = std::env::temp_dir().join(format!("scorecard-term-{}", std::process::id()));
        let mut page = TerminalPage::new(Some(dir.clone()), Logger::silent());
        page.replace_contents(Container::Results, "<div>82</div>".to_string());
        let written = fs::read_to_string(dir.join("results.html")).unwrap();
        assert_eq!(written, "<div>82</div>");
        let _ = fs::remove_dir_all(&dir);
    }
}
