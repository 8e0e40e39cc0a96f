//! Charm-style CLI prompts using cliclack

use crate::naming::{format_target_dir, is_valid_package_name, to_valid_package_name};
use crate::package_manager::PackageManager;
use crate::product::ProductConfig;
use crate::project::{scaffold, OverwritePolicy, ScaffoldRequest};
use crate::reconcile::{classify_for_reuse, Reuse};
use crate::templates::{RootManifest, TemplateEntry, TemplateRoot};
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the product default
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Project directory to create
    pub directory: Option<String>,

    /// Empty a non-empty target without asking
    pub overwrite: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Load the template catalog up front so a bad root fails fast
    let root = TemplateRoot::from_config(config, args.template_dir.clone());
    let catalog = root
        .load_catalog()
        .with_context(|| format!("Failed to load templates from {}", root.path().display()))?;
    if catalog.templates.is_empty() {
        anyhow::bail!("No templates found.");
    }

    // Step 2: Project directory
    let target_input = select_directory(config, &args)?;
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let target = std::path::absolute(current_dir.join(&target_input))
        .with_context(|| format!("Invalid project directory: {}", target_input))?;

    // Step 3: Decide what happens to existing content
    let reuse = classify_for_reuse(&target)?;
    let policy = select_overwrite_policy(&target_input, reuse, &args)?;
    if reuse.needs_confirmation() && policy == OverwritePolicy::Cancel {
        cliclack::outro_cancel("Operation cancelled")?;
        return Ok(());
    }

    // Step 4: Package name
    let package_name = select_package_name(config, &target, &args)?;

    // Step 5: Framework
    let entry = select_template(&catalog, args.template.as_deref(), args.yes)?;

    // Step 6: Create project
    let request = ScaffoldRequest {
        target: target.clone(),
        package_name,
        layers: root.layer_paths(entry),
        policy,
    };
    if !create_project(&request)? {
        cliclack::outro_cancel("Operation cancelled")?;
        return Ok(());
    }

    // Step 7: Show next steps
    print_next_steps(config, &target)?;

    Ok(())
}

/// Print the catalog, one template per line
pub fn list_templates<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<()> {
    let root = TemplateRoot::from_config(config, template_dir);
    let catalog = root
        .load_catalog()
        .with_context(|| format!("Failed to load templates from {}", root.path().display()))?;

    println!(
        "{}",
        format!("{} templates in {}", config.display_name(), root.path().display())
            .cyan()
            .bold()
    );
    println!();
    for entry in &catalog.templates {
        let label = paint(entry.display_name(), entry.color.as_deref());
        if entry.description.is_empty() {
            println!("  {} {} ({})", "->".blue(), label, entry.name);
        } else {
            println!(
                "  {} {} ({}) - {}",
                "->".blue(),
                label,
                entry.name,
                entry.description
            );
        }
    }

    Ok(())
}

fn select_directory<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<String> {
    if let Some(dir) = &args.directory {
        let formatted = format_target_dir(dir);
        if !formatted.is_empty() {
            cliclack::log::info(format!("Using directory: {}", formatted))?;
            return Ok(formatted);
        }
    }

    if args.yes {
        return Ok(config.default_project_name().to_string());
    }

    let input: String = cliclack::input("Project name")
        .placeholder(config.default_project_name())
        .default_input(config.default_project_name())
        .interact()?;

    let formatted = format_target_dir(&input);
    if formatted.is_empty() {
        Ok(config.default_project_name().to_string())
    } else {
        Ok(formatted)
    }
}

fn select_overwrite_policy(
    target_input: &str,
    reuse: Reuse,
    args: &CreateArgs,
) -> Result<OverwritePolicy> {
    if !reuse.needs_confirmation() {
        return Ok(OverwritePolicy::Cancel);
    }

    let shown = if target_input == "." {
        "Current directory".to_string()
    } else {
        format!("Target directory \"{}\"", target_input)
    };

    if args.overwrite {
        cliclack::log::warning(format!("{} is not empty, removing existing files", shown))?;
        return Ok(OverwritePolicy::Empty);
    }

    if args.yes {
        cliclack::log::warning(format!(
            "{} is not empty. Pass --overwrite to replace its contents.",
            shown
        ))?;
        return Ok(OverwritePolicy::Cancel);
    }

    let policy = cliclack::select(format!(
        "{} is not empty. Please choose how to proceed:",
        shown
    ))
    .item(OverwritePolicy::Cancel, "Cancel operation", "")
    .item(
        OverwritePolicy::Empty,
        "Remove existing files and continue",
        "",
    )
    .item(
        OverwritePolicy::Keep,
        "Ignore files and continue",
        "existing files are kept, package.json is merged",
    )
    .interact()?;

    Ok(policy)
}

/// Last path component of the target; empty for paths like `..` or `/`
fn project_dir_name(target: &Path) -> String {
    target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Sanitised package name for `project_name`, or `fallback` when nothing valid remains
fn suggest_package_name(project_name: &str, fallback: &str) -> String {
    let suggested = to_valid_package_name(project_name);
    if is_valid_package_name(&suggested) {
        suggested
    } else {
        fallback.to_string()
    }
}

fn select_package_name<C: ProductConfig>(
    config: &C,
    target: &Path,
    args: &CreateArgs,
) -> Result<String> {
    let project_name = project_dir_name(target);

    if is_valid_package_name(&project_name) {
        return Ok(project_name);
    }

    let suggested = suggest_package_name(&project_name, config.default_project_name());
    if args.yes {
        cliclack::log::info(format!("Using package name: {}", suggested))?;
        return Ok(suggested);
    }

    let name: String = cliclack::input("Package name")
        .default_input(&suggested)
        .placeholder(&suggested)
        .validate(|input: &String| {
            if is_valid_package_name(input) {
                Ok(())
            } else {
                Err("Invalid package.json name")
            }
        })
        .interact()?;

    Ok(name)
}

fn paint(label: &str, color: Option<&str>) -> ColoredString {
    match color.map(str::to_ascii_lowercase).as_deref() {
        Some("red") => label.red(),
        Some("green") => label.green(),
        Some("yellow") => label.yellow(),
        Some("blue") => label.blue(),
        Some("magenta") => label.magenta(),
        Some("cyan") => label.cyan(),
        _ => label.normal(),
    }
}

fn select_template<'a>(
    catalog: &'a RootManifest,
    specified_template: Option<&str>,
    yes: bool,
) -> Result<&'a TemplateEntry> {
    // If a template was specified via --template flag, use it directly
    if let Some(name) = specified_template {
        let entry = catalog.find(name)?;
        cliclack::log::info(format!("Template: {}", entry.display_name()))?;
        return Ok(entry);
    }

    // If only one template (or non-interactive), use the first automatically
    if catalog.templates.len() == 1 || yes {
        let entry = &catalog.templates[0];
        cliclack::log::info(format!("Using template: {}", entry.display_name()))?;
        return Ok(entry);
    }

    // Build select prompt - use indices to avoid borrow issues
    let mut select = cliclack::select("Select a framework");
    for (idx, entry) in catalog.templates.iter().enumerate() {
        select = select.item(
            idx,
            paint(entry.display_name(), entry.color.as_deref()),
            &entry.description,
        );
    }

    let selected_idx: usize = select.interact()?;
    Ok(&catalog.templates[selected_idx])
}

/// Returns `false` when the run was cancelled before anything changed
fn create_project(request: &ScaffoldRequest) -> Result<bool> {
    let spinner = cliclack::spinner();
    spinner.start("Scaffolding project...");

    match scaffold(request) {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.render.file_count(),
                report.target.display()
            ));
            Ok(true)
        }
        Err(e) if e.is_cancellation() => {
            spinner.stop("Target directory is not empty");
            Ok(false)
        }
        Err(e) => {
            spinner.error("Failed to scaffold project");
            Err(e.into())
        }
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir, PackageManager::detect());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_dir_name() {
        assert_eq!(project_dir_name(Path::new("/work/my-app")), "my-app");
        assert_eq!(project_dir_name(Path::new("/work/nested/..")), "");
        assert_eq!(project_dir_name(Path::new("/")), "");
    }

    #[test]
    fn test_suggest_package_name_sanitises() {
        assert_eq!(suggest_package_name("My App", "starter-project"), "my-app");
        assert_eq!(suggest_package_name(".Hidden", "starter-project"), "hidden");
    }

    #[test]
    fn test_suggest_package_name_falls_back_when_nothing_valid() {
        assert_eq!(suggest_package_name("", "starter-project"), "starter-project");
        assert_eq!(suggest_package_name("   ", "starter-project"), "starter-project");

        let target = Path::new("/work/nested/..");
        let name = suggest_package_name(&project_dir_name(target), "starter-project");
        assert!(is_valid_package_name(&name));
        assert_eq!(name, "starter-project");
    }
}
