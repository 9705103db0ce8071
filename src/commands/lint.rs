//! Implementation of the preset lint run.

use std::{
    io::{self, IsTerminal, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    catalog::MessageCatalog,
    commands::ColorChoice,
    config::{Config, Overrides},
    console::Console,
    diagnostics::Diagnostics,
    document::PresetDocument,
    error::{Error, Result},
    palette::Tone,
    paths::display_path,
    prompt::{LinePrompter, Prompter, TerminalPrompter},
    suggest::Suggester,
    traverse::{Traversal, check_shape, print_summary, traverse},
    validator::ChannelValidator,
};

/// What a completed run did.
#[derive(Debug)]
pub(crate) struct Outcome {
    /// Validation results.
    pub(crate) traversal: Traversal,
    /// Whether the repaired preset was written back.
    pub(crate) saved: bool,
}

/// Execute the lint command.
pub fn run(color: ColorChoice, overrides: Overrides) -> Result<()> {
    let config = Config::resolve(Path::new("."), overrides)?;
    let use_color = color.enabled();
    let mut console = Console::stdout(use_color);
    let mut diagnostics = Diagnostics::new(use_color);

    let stdin = io::stdin();
    let outcome = if stdin.is_terminal() {
        let mut prompter = TerminalPrompter::new(use_color);
        execute(&config, &mut console, &mut prompter, &mut diagnostics)?
    } else {
        let mut prompter = LinePrompter::new(stdin.lock(), io::stdout());
        execute(&config, &mut console, &mut prompter, &mut diagnostics)?
    };
    debug!(
        channels = outcome.traversal.counters.channels,
        with_issues = outcome.traversal.records.len(),
        saved = outcome.saved,
        "lint finished"
    );
    Ok(())
}

/// Load, validate, report, and optionally save one preset.
pub(crate) fn execute<W: Write>(
    config: &Config,
    console: &mut Console<W>,
    prompter: &mut dyn Prompter,
    diagnostics: &mut Diagnostics,
) -> Result<Outcome> {
    let suggester = Suggester::new(config.threshold())?;

    console.blank()?;
    console.segments(&[
        (Tone::Identifier, "🔍 Loading preset file: "),
        (Tone::Identifier, &display_path(config.preset())),
    ])?;
    console.blank()?;
    let mut document = PresetDocument::load(config.preset())?;
    check_shape(document.root()).map_err(|message| Error::DocumentShape {
        path: document.path().to_path_buf(),
        message,
    })?;
    console.line(Tone::Success, "✅ Preset loaded successfully.")?;

    let catalog = MessageCatalog::load(config.catalog(), diagnostics);
    if catalog.is_available() && catalog.is_empty() {
        diagnostics.warn(format!(
            "Message catalog {} defines no keys",
            display_path(config.catalog())
        ));
    } else if catalog.is_available() {
        console.line(
            Tone::Success,
            &format!("✅ {} loaded: {} keys.", catalog.source(), catalog.len()),
        )?;
    }
    console.blank()?;

    let traversal = {
        let mut validator =
            ChannelValidator::new(suggester, &catalog, &mut *prompter, &mut *console);
        traverse(document.root_mut(), &mut validator)?
    };
    print_summary(console, &traversal, &catalog)?;

    let saved = if traversal.has_fixes() {
        offer_save(&document, console, prompter)?
    } else {
        false
    };

    diagnostics.print_warning_summary();
    Ok(Outcome { traversal, saved })
}

/// Ask whether to persist accepted repairs, saving on approval.
fn offer_save<W: Write>(
    document: &PresetDocument,
    console: &mut Console<W>,
    prompter: &mut dyn Prompter,
) -> Result<bool> {
    console.blank()?;
    console.line(
        Tone::Warning,
        "🛠 Some fields were auto-corrected during validation.",
    )?;
    console.flush()?;

    let question = format!("💾 Save changes to {}?", document.file_name());
    if !prompter.confirm(&question)? {
        console.line(
            Tone::Identifier,
            "⚠ Changes were NOT saved. Review them and rerun when ready.",
        )?;
        return Ok(false);
    }

    document.save()?;
    console.line(
        Tone::Success,
        &format!(
            "✅ Updated preset saved to disk: {}",
            display_path(document.path())
        ),
    )?;
    Ok(true)
}
