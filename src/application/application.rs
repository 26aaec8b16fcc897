use std::io;
use std::path::Path;

use snafu::prelude::*;
use snafu::{AsErrorSource, ErrorCompat, Snafu};
use tracing::{debug, info, warn};

use crate::application::{RuntimeConfig, Terminal};
use crate::cli::Cli;
use crate::commands::Shell;
use crate::config::{ShellConfig, ShellConfigError, get_config_file_path};
use crate::ext::{BestEffortPathExt, read_text_file};
use crate::navigator::Vfs;

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let file_config = Self::read_config(&cli).await?;
        let runtime_config = RuntimeConfig::merge(&cli, file_config);
        debug!("Runtime config: {:?}", runtime_config);

        let terminal = Terminal::new(runtime_config.prompt.clone());
        let mut stdout = io::stdout();

        let vfs = Self::load_vfs(runtime_config.vfs.as_deref(), &terminal, &mut stdout)
            .await
            .context(TerminalSnafu)?;
        let mut shell = Shell::new(vfs, runtime_config.session_info());
        terminal.banner(&shell, &mut stdout).context(TerminalSnafu)?;

        if let Some(script) = &runtime_config.script {
            let exited = Self::run_startup_script(&mut shell, script, &terminal, &mut stdout)
                .await
                .context(TerminalSnafu)?;
            if exited {
                info!("Startup script ended the session");
                return Ok(());
            }
        }

        terminal
            .run(&mut shell, io::stdin().lock(), &mut stdout)
            .context(TerminalSnafu)
    }

    /// An explicit `--config` must be readable; the default file is optional.
    async fn read_config(cli: &Cli) -> Result<ShellConfig, ApplicationError> {
        let (path, explicit) = match &cli.config {
            Some(path) => (path.clone(), true),
            None => (get_config_file_path(Path::new(".")), false),
        };

        if !explicit && !path.exists() {
            debug!("No config file at {}, using defaults", path.best_effort_path_display());
            return Ok(ShellConfig::default());
        }

        let config = ShellConfig::from_path(&path).await.context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Falls back to the built-in tree when the document cannot be used.
    async fn load_vfs(
        path: Option<&Path>,
        terminal: &Terminal,
        out: &mut impl io::Write,
    ) -> io::Result<Vfs> {
        let Some(path) = path else {
            return Ok(Vfs::bootstrap());
        };

        let loaded = match read_text_file(path).await {
            Ok(contents) => Vfs::from_document(&contents).map_err(|e| describe(&e)),
            Err(e) => Err(describe(&e)),
        };

        match loaded {
            Ok(vfs) => {
                info!(
                    "Loaded VFS '{}' from {}",
                    vfs.label(),
                    path.best_effort_path_display()
                );
                Ok(vfs)
            }
            Err(message) => {
                warn!("Falling back to the default VFS: {}", message);
                terminal.error(
                    &format!(
                        "Cannot load VFS from {}: {}; using the built-in tree",
                        path.best_effort_path_display(),
                        message
                    ),
                    out,
                )?;
                Ok(Vfs::bootstrap())
            }
        }
    }

    /// Returns whether the script asked to end the session.
    async fn run_startup_script(
        shell: &mut Shell,
        path: &Path,
        terminal: &Terminal,
        out: &mut impl io::Write,
    ) -> io::Result<bool> {
        let source = match read_text_file(path).await {
            Ok(source) => source,
            Err(e) => {
                warn!("Skipping startup script: {}", e);
                terminal.error(&format!("Startup script not run: {}", describe(&e)), out)?;
                return Ok(false);
            }
        };

        info!("Running startup script {}", path.best_effort_path_display());
        let mut write_result = Ok(());
        let result = shell.run_script(&source, |line, output| {
            if write_result.is_ok() {
                write_result = terminal.script_step(line, output, &mut *out);
            }
        });
        write_result?;

        match result {
            Ok(outcome) => Ok(outcome.exited),
            Err(e) => {
                warn!("{}", e);
                terminal.error(&e.to_string(), out)?;
                Ok(false)
            }
        }
    }
}

/// Flattens an error and its causes into one line.
fn describe<E: ErrorCompat + AsErrorSource>(error: &E) -> String {
    error
        .iter_chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading the config file"))]
    ConfigError { source: ShellConfigError },
    #[snafu(display("Critical failure encountered while talking to the terminal"))]
    TerminalError { source: io::Error },
}
