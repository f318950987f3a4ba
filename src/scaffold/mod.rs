//! # Feature-Module Scaffolder
//!
//! Offline tool that stamps out a complete feature module (model, validation,
//! service, controller, repository, DTO, routes, module registration) from
//! the templates under `templates/`, then wires the module into
//! `src/routes.rs` by inserting an import line and a registry line above the
//! sentinel comments there.
//!
//! The tool fails fast: a missing template, a pre-existing output file, or
//! any I/O failure aborts the run immediately. It never overwrites generated
//! or hand-edited code, and it never rolls back files written before the
//! failure; re-running after a fix is safe for the paths it has not touched.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use minijinja::{Environment, context};

pub mod naming;

pub const IMPORT_SENTINEL: &str = "// MODULE IMPORTS";
pub const REGISTRY_SENTINEL: &str = "// MODULE REGISTRY";

enum OutName {
    /// `<snake-cased entity>.rs` inside a per-descriptor subfolder.
    Entity,
    /// Fixed name at the module root (route and module descriptors).
    Fixed(&'static str),
}

struct TemplateSpec {
    template: &'static str,
    subdir: Option<&'static str>,
    out_name: OutName,
}

const TEMPLATES: [TemplateSpec; 8] = [
    TemplateSpec {
        template: "model.rs.tmpl",
        subdir: Some("models"),
        out_name: OutName::Entity,
    },
    TemplateSpec {
        template: "validation.rs.tmpl",
        subdir: Some("validations"),
        out_name: OutName::Entity,
    },
    TemplateSpec {
        template: "service.rs.tmpl",
        subdir: Some("services"),
        out_name: OutName::Entity,
    },
    TemplateSpec {
        template: "controller.rs.tmpl",
        subdir: Some("controllers"),
        out_name: OutName::Entity,
    },
    TemplateSpec {
        template: "repository.rs.tmpl",
        subdir: Some("repositories"),
        out_name: OutName::Entity,
    },
    TemplateSpec {
        template: "dto.rs.tmpl",
        subdir: Some("dto"),
        out_name: OutName::Entity,
    },
    TemplateSpec {
        template: "route.rs.tmpl",
        subdir: None,
        out_name: OutName::Fixed("routes.rs"),
    },
    TemplateSpec {
        template: "module.rs.tmpl",
        subdir: None,
        out_name: OutName::Fixed("mod.rs"),
    },
];

/// A parsed feature path such as `customer` or `master/area`.
#[derive(Debug, Clone)]
pub struct Feature {
    /// The raw input, e.g. `master/area`.
    pub path: String,
    /// Parent segments, e.g. `["master"]`.
    pub parents: Vec<String>,
    /// The entity name, always the last segment.
    pub entity: String,
}

impl Feature {
    /// # Errors
    ///
    /// Fails when the path is empty or any segment is empty.
    pub fn parse(input: &str) -> Result<Self> {
        let segments: Vec<&str> = input.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            bail!("feature path must be non-empty segments separated by '/'");
        }
        let (entity, parents) = segments
            .split_last()
            .context("feature path must end in a non-empty entity name")?;
        Ok(Self {
            path: input.to_string(),
            parents: parents.iter().map(ToString::to_string).collect(),
            entity: (*entity).to_string(),
        })
    }

    /// Directory/module name holding the feature, e.g. `areas`.
    #[must_use]
    pub fn module_name(&self) -> String {
        naming::plural(&naming::snake(&self.entity))
    }

    /// Snake-cased parent segments, e.g. `["master"]`.
    fn parent_segments(&self) -> Vec<String> {
        self.parents.iter().map(|p| naming::snake(p)).collect()
    }

    /// Full module path for the import line, e.g.
    /// `crate::modules::master::areas`.
    #[must_use]
    pub fn module_path(&self) -> String {
        let mut segments = vec!["crate".to_string(), "modules".to_string()];
        segments.extend(self.parent_segments());
        segments.push(self.module_name());
        segments.join("::")
    }
}

pub struct Generator {
    root: PathBuf,
    templates_dir: PathBuf,
}

impl Generator {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            templates_dir: templates_dir.into(),
        }
    }

    /// Generates all eight files for `feature_path` and patches the route
    /// registry.
    ///
    /// # Errors
    ///
    /// Any precondition violation or I/O failure is fatal; files written
    /// before the failure are left in place.
    pub fn run(&self, feature_path: &str) -> Result<()> {
        let feature = Feature::parse(feature_path)?;
        let module_dir = self.module_dir(&feature);

        for spec in &TEMPLATES {
            let template_path = self.templates_dir.join(spec.template);
            if !template_path.exists() {
                bail!("template not found at {}", template_path.display());
            }

            let out_dir = match spec.subdir {
                Some(subdir) => module_dir.join(subdir),
                None => module_dir.clone(),
            };
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("make dir {}", out_dir.display()))?;

            let out_file = match spec.out_name {
                OutName::Entity => out_dir.join(format!("{}.rs", naming::snake(&feature.entity))),
                OutName::Fixed(name) => out_dir.join(name),
            };
            if out_file.exists() {
                bail!("file already exists: {}", out_file.display());
            }

            let source = fs::read_to_string(&template_path)
                .with_context(|| format!("read template {}", template_path.display()))?;
            let rendered = render(&source, &feature)?;
            fs::write(&out_file, rendered)
                .with_context(|| format!("write {}", out_file.display()))?;
            println!("Generated: {}", out_file.display());
        }

        self.ensure_module_decls(&feature)?;
        self.update_routes(&feature)?;
        Ok(())
    }

    fn module_dir(&self, feature: &Feature) -> PathBuf {
        let mut dir = self.root.join("src").join("modules");
        for segment in feature.parent_segments() {
            dir = dir.join(segment);
        }
        dir.join(feature.module_name())
    }

    /// Makes sure every ancestor `mod.rs` under `src/modules/` declares the
    /// next path segment, creating intermediate files as needed, so the
    /// generated module is reachable from the crate root.
    fn ensure_module_decls(&self, feature: &Feature) -> Result<()> {
        let mut dir = self.root.join("src").join("modules");
        let mut segments = feature.parent_segments();
        segments.push(feature.module_name());

        for segment in segments {
            let mod_file = dir.join("mod.rs");
            let decl = format!("pub mod {segment};");
            if mod_file.exists() {
                let content = fs::read_to_string(&mod_file)
                    .with_context(|| format!("read {}", mod_file.display()))?;
                if !content.contains(&decl) {
                    let separator = if content.ends_with('\n') { "" } else { "\n" };
                    fs::write(&mod_file, format!("{content}{separator}{decl}\n"))
                        .with_context(|| format!("write {}", mod_file.display()))?;
                }
            } else {
                fs::create_dir_all(&dir)
                    .with_context(|| format!("make dir {}", dir.display()))?;
                fs::write(&mod_file, format!("{decl}\n"))
                    .with_context(|| format!("write {}", mod_file.display()))?;
            }
            dir = dir.join(&segment);
        }
        Ok(())
    }

    /// Inserts the module's import and registry lines above the sentinel
    /// comments in `src/routes.rs`. Insertions whose exact text is already
    /// present are skipped, so repeating a generation never duplicates lines.
    ///
    /// An unreadable route file is a warning, not an error: the file may
    /// have been relocated, and the generated module is still usable.
    ///
    /// # Errors
    ///
    /// Fails when the patched file cannot be written back.
    pub fn update_routes(&self, feature: &Feature) -> Result<()> {
        let route_file = self.root.join("src").join("routes.rs");
        let mut content = match fs::read_to_string(&route_file) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("skip updating {}: {err}", route_file.display());
                return Ok(());
            }
        };

        let import_line = format!("use {};", feature.module_path());
        if !content.contains(&import_line) {
            content = content.replacen(
                IMPORT_SENTINEL,
                &format!("{import_line}\n{IMPORT_SENTINEL}"),
                1,
            );
        }

        let registry_line = format!(
            "Box::new({}::{}Module),",
            feature.module_name(),
            naming::pascal(&feature.entity)
        );
        if !content.contains(&registry_line) {
            content = content.replacen(
                REGISTRY_SENTINEL,
                &format!("{registry_line}\n        {REGISTRY_SENTINEL}"),
                1,
            );
        }

        fs::write(&route_file, content)
            .with_context(|| format!("write {}", route_file.display()))?;
        println!("Updated: {}", route_file.display());
        Ok(())
    }
}

fn render(source: &str, feature: &Feature) -> Result<String> {
    let mut env = Environment::new();
    env.add_filter("pascal", |value: String| naming::pascal(&value));
    env.add_filter("camel", |value: String| naming::camel(&value));
    env.add_filter("plural", |value: String| naming::plural(&value));
    env.add_filter("kebab", |value: String| naming::kebab(&value));
    env.add_filter("snake", |value: String| naming::snake(&value));
    env.add_template("template.rs", source)?;
    let template = env.get_template("template.rs")?;
    let rendered = template.render(context! {
        feat_name => feature.path,
        entity => feature.entity,
        module_name => feature.module_name(),
    })?;
    Ok(rendered)
}
