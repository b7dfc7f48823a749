use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use vtgen::emit::{self, EmitOptions, GenError, GenErrorKind, Mode};
use vtgen::language;
use vtgen::report::{Diagnostic, OutputStats, Severity, Stage, ToolReport};
use vtgen_contracts::VTGEN_REPORT_SCHEMA_VERSION;

#[derive(Parser)]
#[command(name = "vtgen")]
#[command(about = "ViewTuple impl generator (arities -> macro invocations).", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    ToolId,
    Gen {
        #[arg(long, value_enum, default_value_t = Mode::Bidirectional)]
        mode: Mode,
        #[arg(long, default_value_t = language::limits::DEFAULT_MAX_ELEMENTS)]
        max_elements: usize,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_name = "BYTES")]
        max_source_bytes: Option<usize>,
        #[arg(long)]
        report_json: bool,
    },
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Bidirectional)]
        mode: Mode,
        #[arg(long, default_value_t = language::limits::DEFAULT_MAX_ELEMENTS)]
        max_elements: usize,
        #[arg(long)]
        report_json: bool,
    },
}

fn main() -> std::process::ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::ToolId => {
            println!("{}", language::TOOL_ID);
            Ok(std::process::ExitCode::SUCCESS)
        }
        Cmd::Gen {
            mode,
            max_elements,
            out,
            max_source_bytes,
            report_json,
        } => {
            if report_json && out.is_none() {
                let report = ToolReport {
                    schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                    command: "gen",
                    ok: false,
                    target: "-".to_string(),
                    mode: mode.as_str(),
                    max_elements,
                    output: None,
                    diagnostics_count: 1,
                    diagnostics: vec![diagnostic_error(
                        "VTGEN-CLI-ARGS-0001",
                        Stage::Config,
                        "--report-json requires --out (otherwise stdout would be the generated source)",
                    )],
                    exit_code: 2,
                };
                print_json(&report)?;
                return Ok(std::process::ExitCode::from(2));
            }

            if let Some(max_source_bytes) = max_source_bytes {
                std::env::set_var("VTGEN_MAX_SOURCE_BYTES", max_source_bytes.to_string());
            }

            let target = match &out {
                Some(path) => path.display().to_string(),
                None => "-".to_string(),
            };

            let options = EmitOptions { mode, max_elements };
            let src = match emit::emit_viewtuple_source(&options) {
                Ok(src) => src,
                Err(err) => {
                    if report_json {
                        let report = ToolReport {
                            schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                            command: "gen",
                            ok: false,
                            target,
                            mode: mode.as_str(),
                            max_elements,
                            output: None,
                            diagnostics_count: 1,
                            diagnostics: vec![gen_error_diagnostic(&err)],
                            exit_code: 2,
                        };
                        print_json(&report)?;
                        return Ok(std::process::ExitCode::from(2));
                    }
                    anyhow::bail!("emit failed: {:?}: {}", err.kind, err.message);
                }
            };

            match &out {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("create output dir: {}", parent.display()))?;
                    }
                    if let Err(err) = std::fs::write(path, src.as_bytes()) {
                        if report_json {
                            let report = ToolReport {
                                schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                                command: "gen",
                                ok: false,
                                target,
                                mode: mode.as_str(),
                                max_elements,
                                output: None,
                                diagnostics_count: 1,
                                diagnostics: vec![diagnostic_error(
                                    "VTGEN-IO-WRITE-0001",
                                    Stage::Io,
                                    &format!("write {}: {err}", path.display()),
                                )],
                                exit_code: 2,
                            };
                            print_json(&report)?;
                            return Ok(std::process::ExitCode::from(2));
                        }
                        return Err(err).with_context(|| format!("write: {}", path.display()));
                    }
                }
                None => {
                    print!("{src}");
                }
            }

            if report_json {
                let report = ToolReport {
                    schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                    command: "gen",
                    ok: true,
                    target,
                    mode: mode.as_str(),
                    max_elements,
                    output: Some(OutputStats::for_source(&src)),
                    diagnostics_count: 0,
                    diagnostics: Vec::new(),
                    exit_code: 0,
                };
                print_json(&report)?;
            }

            Ok(std::process::ExitCode::SUCCESS)
        }
        Cmd::Check {
            input,
            mode,
            max_elements,
            report_json,
        } => {
            let target = input.display().to_string();

            let bytes = match std::fs::read(&input) {
                Ok(bytes) => bytes,
                Err(err) => {
                    if report_json {
                        let report = ToolReport {
                            schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                            command: "check",
                            ok: false,
                            target,
                            mode: mode.as_str(),
                            max_elements,
                            output: None,
                            diagnostics_count: 1,
                            diagnostics: vec![diagnostic_error(
                                "VTGEN-IO-READ-0001",
                                Stage::Io,
                                &format!("read input {}: {err}", input.display()),
                            )],
                            exit_code: 2,
                        };
                        print_json(&report)?;
                        return Ok(std::process::ExitCode::from(2));
                    }
                    return Err(err).with_context(|| format!("read input: {}", input.display()));
                }
            };

            let options = EmitOptions { mode, max_elements };
            let src = match emit::emit_viewtuple_source(&options) {
                Ok(src) => src,
                Err(err) => {
                    if report_json {
                        let report = ToolReport {
                            schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                            command: "check",
                            ok: false,
                            target,
                            mode: mode.as_str(),
                            max_elements,
                            output: None,
                            diagnostics_count: 1,
                            diagnostics: vec![gen_error_diagnostic(&err)],
                            exit_code: 2,
                        };
                        print_json(&report)?;
                        return Ok(std::process::ExitCode::from(2));
                    }
                    anyhow::bail!("emit failed: {:?}: {}", err.kind, err.message);
                }
            };

            if bytes != src.as_bytes() {
                if report_json {
                    let report = ToolReport {
                        schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                        command: "check",
                        ok: false,
                        target,
                        mode: mode.as_str(),
                        max_elements,
                        output: Some(OutputStats::for_source(&src)),
                        diagnostics_count: 1,
                        diagnostics: vec![diagnostic_error(
                            "VTGEN-CHECK-0001",
                            Stage::Check,
                            &format!("file is out of date: {}", input.display()),
                        )],
                        exit_code: 1,
                    };
                    print_json(&report)?;
                    return Ok(std::process::ExitCode::from(1));
                }
                anyhow::bail!("file is out of date: {}", input.display());
            }

            if report_json {
                let report = ToolReport {
                    schema_version: VTGEN_REPORT_SCHEMA_VERSION,
                    command: "check",
                    ok: true,
                    target,
                    mode: mode.as_str(),
                    max_elements,
                    output: Some(OutputStats::for_source(&src)),
                    diagnostics_count: 0,
                    diagnostics: Vec::new(),
                    exit_code: 0,
                };
                print_json(&report)?;
            }

            Ok(std::process::ExitCode::SUCCESS)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn gen_error_diagnostic(err: &GenError) -> Diagnostic {
    let (code, stage) = match err.kind {
        GenErrorKind::Config => ("VTGEN-CONFIG-0001", Stage::Config),
        GenErrorKind::Budget => ("VTGEN-BUDGET-0001", Stage::Emit),
    };
    diagnostic_error(code, stage, &err.message)
}

fn diagnostic_error(code: &str, stage: Stage, message: &str) -> Diagnostic {
    Diagnostic {
        code: code.to_string(),
        severity: Severity::Error,
        stage,
        message: message.to_string(),
    }
}
