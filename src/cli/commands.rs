use crate::{
    cli::args::{CodesArgs, NormalizeArgs, NormalizeFormat, OutputFormat, ValidateArgs},
    core::{
        codes as finding_codes, config::loader::CONFIG_FILE_NAME, format_findings, parse_value,
        read_tree, AppError, ConfigLoader, ErrorCategory, Finding, FlowValidator,
        InputFormat, ValidationResult, ValidatorConfig,
    },
    Result,
};
use serde::Serialize;
use std::{env, fs, path::Path};

/// Per-file entry of the JSON validation report.
#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

#[derive(Serialize)]
struct CodeEntry {
    code: &'static str,
    severity: String,
}

pub fn validate(args: ValidateArgs) -> Result<bool> {
    let config = load_config(args.config.as_deref())?;
    let validator = FlowValidator::with_config(&config);
    let format = InputFormat::from(args.input_format);

    let mut results = Vec::with_capacity(args.files.len());
    for file in &args.files {
        tracing::info!("Validating flow document: {}", file.display());
        let result = match read_document(file) {
            Ok(text) => validator.validate_str(&text, format),
            Err(err) => {
                tracing::warn!("Cannot read {}: {}", file.display(), err);
                ValidationResult::from_findings(vec![Finding::parse_error(err.message)])
            }
        };
        results.push((file.clone(), result));
    }

    let all_valid = results.iter().all(|(_, result)| result.valid);
    match args.output {
        OutputFormat::Text => {
            for (index, (file, result)) in results.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("{}", file.display());
                println!("{}", format_findings(result));
            }
        }
        OutputFormat::Json => {
            let reports: Vec<FileReport<'_>> = results
                .iter()
                .map(|(file, result)| FileReport {
                    file: file.display().to_string(),
                    result,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(all_valid)
}

pub fn normalize(args: NormalizeArgs) -> Result<bool> {
    let config = load_config(args.config.as_deref())?;
    let validator = FlowValidator::with_config(&config);
    let text = read_document(&args.file)?;

    let tree = match read_tree(&text, args.input_format.into(), validator.limits()) {
        Ok(tree) => tree,
        Err(err) => {
            let result = ValidationResult::from_findings(err.into_findings());
            eprintln!("{}", format_findings(&result));
            return Ok(false);
        }
    };

    let result = validator.validate(&tree);
    if !result.valid {
        eprintln!("{}", format_findings(&result));
        return Ok(false);
    }

    let flow = parse_value(&tree, validator.limits()).map_err(AppError::from)?;
    let rendered = match args.output {
        NormalizeFormat::Json => serde_json::to_string_pretty(&flow)?,
        NormalizeFormat::Yaml => serde_yaml::to_string(&flow)?,
    };
    println!("{}", rendered.trim_end());
    Ok(true)
}

pub fn codes(args: CodesArgs) -> Result<()> {
    let entries: Vec<CodeEntry> = finding_codes::CATALOGUE
        .iter()
        .map(|&(code, severity)| CodeEntry {
            code,
            severity: severity
                .map(|severity| severity.to_string())
                .unwrap_or_else(|| "allow".to_string()),
        })
        .collect();

    match args.output {
        OutputFormat::Text => {
            let width = entries.iter().map(|entry| entry.code.len()).max().unwrap_or(0);
            for entry in &entries {
                println!("{:<width$}  {}", entry.code, entry.severity, width = width);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<ValidatorConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::new(
                    ErrorCategory::ConfigurationError,
                    format!("config file {} does not exist", path.display()),
                )
                .with_context("path", path.display().to_string())
                .into());
            }
            ConfigLoader::load_with_overrides(path)?
        }
        None => {
            let workspace = env::current_dir()?;
            tracing::debug!(
                "Loading {} from {}",
                CONFIG_FILE_NAME,
                workspace.display()
            );
            ConfigLoader::load_from_workspace(&workspace)?
        }
    };
    Ok(config)
}

fn read_document(path: &Path) -> std::result::Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to read {}: {}", path.display(), e),
        )
        .with_context("path", path.display().to_string())
    })
}
