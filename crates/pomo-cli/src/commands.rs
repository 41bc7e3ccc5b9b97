//! Subcommand implementations.
//!
//! Each command writes its result to the given writer so the binary can use
//! stdout and tests can capture a buffer.

use crate::cli::{CheckArgs, Cli, Commands, EvalArgs, TranslateArgs};
use crate::error::CliResult;
use pomo_common::truncate_string;
use pomo_config::{Config, ConfigCache, ConfigLoader};
use pomo_plural::PluralForms;
use pomo_translations::{Headers, TranslationLoader, Translations};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

const MSGID_DISPLAY_WIDTH: usize = 60;

/// Loads the configuration file, or the defaults when none is given.
pub async fn load_config(path: Option<&Path>) -> CliResult<ConfigCache> {
    match path {
        Some(path) => Ok(ConfigCache::open(ConfigLoader::new(path)).await?),
        None => Ok(ConfigCache::default()),
    }
}

/// Runs the parsed command.
pub async fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> CliResult<()> {
    match &cli.command {
        Commands::Eval(args) => eval(args, out),
        Commands::Check(args) => {
            let loader = TranslationLoader::from_config(config)?;
            check(&loader, args, out).await
        }
        Commands::Translate(args) => {
            let loader = TranslationLoader::from_config(config)?;
            translate(&loader, args, out).await
        }
    }
}

/// `pomo eval`: prints `n => index` for every count.
pub fn eval<W: Write>(args: &EvalArgs, out: &mut W) -> CliResult<()> {
    let forms = PluralForms::new(&args.expression)?;
    if args.rpn {
        writeln!(out, "rpn: {}", forms.program())?;
    }

    for &n in &args.counts {
        writeln!(out, "{n} => {}", forms.get(n)?)?;
    }
    debug!(
        "Evaluated {} counts with {} program runs",
        args.counts.len(),
        forms.evaluation_count()
    );
    Ok(())
}

/// A plural entry whose number of translations differs from `nplurals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralMismatch {
    /// The entry's msgid
    pub msgid: String,
    /// The entry's msgctxt
    pub context: Option<String>,
    /// Forms the catalog declares
    pub expected: usize,
    /// Forms the entry provides
    pub found: usize,
}

/// Summary printed by `pomo check`
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Catalog file
    pub path: String,
    /// Canonical charset from `Content-Type`
    pub charset: Option<String>,
    /// Number of plural forms in effect
    pub nplurals: usize,
    /// Plural expression in effect, if the catalog declares one
    pub plural_expression: Option<String>,
    /// Catalog headers in declaration order
    pub headers: Headers,
    /// Number of entries
    pub entries: usize,
    /// Number of entries with a plural msgid
    pub plural_entries: usize,
    /// Translated plural entries with the wrong number of forms
    pub mismatched: Vec<PluralMismatch>,
}

impl CheckReport {
    /// Builds the report for a loaded catalog.
    pub fn new(path: &Path, translations: &Translations) -> Self {
        let nplurals = translations.get_plural_forms_count();
        let plural_entries = translations.entries().filter(|e| e.is_plural()).count();
        let mismatched = translations
            .entries()
            .filter(|e| e.is_plural() && !e.translations.is_empty())
            .filter(|e| e.translations.len() != nplurals)
            .map(|e| PluralMismatch {
                msgid: e.singular.clone(),
                context: e.context.clone(),
                expected: nplurals,
                found: e.translations.len(),
            })
            .collect();

        Self {
            path: path.display().to_string(),
            charset: translations.charset(),
            nplurals,
            plural_expression: translations
                .plural_forms()
                .map(|forms| forms.expression().to_string()),
            headers: translations.headers().clone(),
            entries: translations.len(),
            plural_entries,
            mismatched,
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> CliResult<()> {
        writeln!(out, "File: {}", self.path)?;
        writeln!(out, "Charset: {}", self.charset.as_deref().unwrap_or("unknown"))?;
        writeln!(
            out,
            "Plural forms: {} ({})",
            self.nplurals,
            self.plural_expression.as_deref().unwrap_or("default")
        )?;
        writeln!(out, "Entries: {} ({} plural)", self.entries, self.plural_entries)?;

        if !self.headers.is_empty() {
            writeln!(out, "Headers:")?;
            for (name, value) in &self.headers {
                writeln!(out, "  {name}: {value}")?;
            }
        }

        if !self.mismatched.is_empty() {
            writeln!(out, "Mismatched plural entries:")?;
            for mismatch in &self.mismatched {
                let msgid = truncate_string(&mismatch.msgid, MSGID_DISPLAY_WIDTH);
                match &mismatch.context {
                    Some(context) => write!(out, "  \"{msgid}\" [{context}]")?,
                    None => write!(out, "  \"{msgid}\"")?,
                }
                writeln!(out, ": {} of {} forms", mismatch.found, mismatch.expected)?;
            }
        }
        Ok(())
    }
}

/// `pomo check`: loads a catalog and prints its report.
pub async fn check<W: Write>(loader: &TranslationLoader, args: &CheckArgs, out: &mut W) -> CliResult<()> {
    let translations = loader.load_file(&args.file).await?;
    let report = CheckReport::new(&args.file, &translations);
    info!(
        "Checked {} entries, {} mismatched",
        report.entries,
        report.mismatched.len()
    );

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    } else {
        report.write_text(out)
    }
}

/// `pomo translate`: prints the translation of one message.
pub async fn translate<W: Write>(
    loader: &TranslationLoader,
    args: &TranslateArgs,
    out: &mut W,
) -> CliResult<()> {
    let translations = loader.load_file(&args.file).await?;
    let context = args.context.as_deref();

    let translated = match (&args.plural, args.count) {
        (Some(plural), Some(count)) => {
            translations.translate_plural(&args.msgid, plural, count, context)?
        }
        _ => translations.translate(&args.msgid, context),
    };
    writeln!(out, "{translated}")?;
    Ok(())
}
