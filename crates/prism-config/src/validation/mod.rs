//! Full configuration validation.
//!
//! Each section is checked independently and every problem is collected
//! into a single `ConfigError`, so users fix their config in one pass.

mod helpers;


use crate::schema::PrismConfig;
use helpers::{require_non_empty, validate_range};
use prism_common::ConfigError;

const TIMEOUT_RANGE: (u64, u64) = (1, 300);
const COLORS_RANGE: (u64, u64) = (8, 256);

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PrismConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_extractor(&mut errors, config);
    validate_backup(&mut errors, config);
    validate_templates(&mut errors, config);
    validate_reload(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_extractor(errors: &mut Vec<String>, config: &PrismConfig) {
    let ex = &config.extractor;
    require_non_empty(errors, "extractor.program", &ex.program);
    validate_range(
        errors,
        "extractor.colors",
        u64::from(ex.colors),
        COLORS_RANGE.0,
        COLORS_RANGE.1,
    );
    validate_range(
        errors,
        "extractor.timeout_secs",
        ex.timeout_secs,
        TIMEOUT_RANGE.0,
        TIMEOUT_RANGE.1,
    );
}

fn validate_backup(errors: &mut Vec<String>, config: &PrismConfig) {
    for (i, file) in config.backup.extra_files.iter().enumerate() {
        let file = file.trim();
        if !(file.starts_with('/') || file.starts_with("~/")) {
            errors.push(format!(
                "backup.extra_files[{i}] = {file:?} must be absolute or start with ~/"
            ));
        }
    }
}

fn validate_templates(errors: &mut Vec<String>, config: &PrismConfig) {
    let mut seen: Vec<&str> = Vec::new();
    for (i, t) in config.templates.iter().enumerate() {
        require_non_empty(errors, &format!("templates[{i}].name"), &t.name);
        require_non_empty(errors, &format!("templates[{i}].source"), &t.source);
        require_non_empty(errors, &format!("templates[{i}].target"), &t.target);
        let target = t.target.trim();
        if !target.is_empty() && !is_snapshot_root(target) {
            errors.push(format!(
                "templates[{i}].target = {target:?} must start with ~/ or /etc/"
            ));
        }
        if !t.name.is_empty() {
            if seen.contains(&t.name.as_str()) {
                errors.push(format!("duplicate template name '{}'", t.name));
            }
            seen.push(&t.name);
        }
    }
}

/// Only files under home or `/etc` can be captured in a snapshot.
fn is_snapshot_root(target: &str) -> bool {
    target.starts_with("~/") || target.starts_with("/etc/")
}

fn validate_reload(errors: &mut Vec<String>, config: &PrismConfig) {
    for (i, r) in config.reload.iter().enumerate() {
        require_non_empty(errors, &format!("reload[{i}].name"), &r.name);
        match r.command.first() {
            Some(program) => {
                require_non_empty(errors, &format!("reload[{i}].command[0]"), program)
            }
            None => errors.push(format!("reload[{i}].command must not be empty")),
        }
        validate_range(
            errors,
            &format!("reload[{i}].timeout_secs"),
            r.timeout_secs,
            TIMEOUT_RANGE.0,
            TIMEOUT_RANGE.1,
        );
    }
}
