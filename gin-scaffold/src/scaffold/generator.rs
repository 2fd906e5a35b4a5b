//! Scaffold generator orchestrator
//!
//! This module builds the data handed to templates and decides which template
//! renders into which file:
//! - Project layout (`init`)
//! - Models and their database sessions
//! - Controllers and route registration

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::field_type::FieldSpec;
use super::helpers::{ModelNames, TemplateHelpers};
use super::renderer::TemplateDir;
use super::writer::TemplateJob;
use crate::error::{Result, ScaffoldError};

/// Directories created by `init`
pub const PROJECT_DIRS: [&str; 5] = ["models", "controllers", "helpers", "config", "templates"];

/// Template directories installed verbatim by `init`
pub const INSTALLED_DIRS: [&str; 3] = ["helpers", "config", "controllers"];

/// Project entry point template
pub const MAIN_TEMPLATE: &str = "main.go.tmpl";
/// Model struct template
pub const MODEL_TEMPLATE: &str = "model.go.tmpl";
/// Model database session template
pub const MODEL_DBSESSION_TEMPLATE: &str = "model_dbsession.go.tmpl";
/// Controller template
pub const CONTROLLER_TEMPLATE: &str = "controller.go.tmpl";
/// Route registration snippet inserted into the router file
pub const ROUTE_TEMPLATE: &str = "route.go.tmpl";

/// Template data for one model
///
/// Field order in `fields` has no meaning; templates must not depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Derived names
    #[serde(flatten)]
    pub names: ModelNames,
    /// Go import path of the project
    pub package_name: String,
    /// Fields keyed by label
    pub fields: BTreeMap<String, FieldSpec>,
}

impl ModelDescriptor {
    /// Build the descriptor from a base name and `name:type` declarations
    ///
    /// A label declared twice keeps its last declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the name yields no identifier or a declaration is malformed.
    pub fn new(base_name: &str, declarations: &[String], package_name: &str) -> Result<Self> {
        let names = ModelNames::derive(base_name);
        if names.model_name.is_empty() {
            return Err(ScaffoldError::InvalidModelName(base_name.to_string()));
        }

        let fields = declarations
            .iter()
            .map(|declaration| FieldSpec::parse(declaration).map(|field| (field.name.clone(), field)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        tracing::debug!(
            model = %names.model_name,
            fields = fields.len(),
            "model descriptor built"
        );

        Ok(Self {
            names,
            package_name: package_name.to_string(),
            fields,
        })
    }
}

/// Template data for `init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    /// Absolute project directory
    pub project_dir: PathBuf,
    /// Directory base name
    pub project_name: String,
    /// Prefix for database names
    pub database_name_prefix: String,
    /// Go import path of the project
    pub package_name: String,
}

impl ProjectDescriptor {
    /// Describe a project rooted at `project_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory has no usable base name.
    pub fn new(project_dir: PathBuf, package_root: &str) -> Result<Self> {
        let project_name = project_dir
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| ScaffoldError::InvalidProjectDir(project_dir.clone()))?;

        let package_name = if package_root.is_empty() {
            project_name.clone()
        } else {
            format!("{}/{project_name}", package_root.trim_end_matches('/'))
        };

        Ok(Self {
            database_name_prefix: project_name.clone(),
            project_dir,
            project_name,
            package_name,
        })
    }

    /// Every file `init` installs, in order
    #[must_use]
    pub fn jobs(&self, templates: &TemplateDir) -> Vec<TemplateJob> {
        let mut jobs: Vec<TemplateJob> = INSTALLED_DIRS
            .iter()
            .flat_map(|dir| templates.list(dir))
            .map(|identifier| {
                let output = identifier.strip_suffix(".tmpl").unwrap_or(&identifier);
                let output = self.project_dir.join(output);
                TemplateJob::new(identifier.clone(), output)
            })
            .collect();

        jobs.push(TemplateJob::new(
            MAIN_TEMPLATE,
            self.project_dir.join(format!("{}.go", self.project_name)),
        ));
        jobs
    }
}

/// Plans the files generated for one model
pub struct ScaffoldGenerator {
    descriptor: ModelDescriptor,
    project_root: PathBuf,
}

impl ScaffoldGenerator {
    /// Create a generator writing below `project_root`
    #[must_use]
    pub const fn new(descriptor: ModelDescriptor, project_root: PathBuf) -> Self {
        Self {
            descriptor,
            project_root,
        }
    }

    /// Template data
    #[must_use]
    pub const fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    /// Model struct and database session files
    #[must_use]
    pub fn model_jobs(&self) -> Vec<TemplateJob> {
        let models = self.project_root.join("models");
        let underscore = &self.descriptor.names.underscore_name;
        vec![
            TemplateJob::new(MODEL_TEMPLATE, models.join(format!("{underscore}.go"))),
            TemplateJob::new(
                MODEL_DBSESSION_TEMPLATE,
                models.join(format!("{underscore}_dbsession.go")),
            ),
        ]
    }

    /// Controller file
    #[must_use]
    pub fn controller_job(&self) -> TemplateJob {
        let file = TemplateHelpers::underscore(&self.descriptor.names.model_name_plural);
        TemplateJob::new(
            CONTROLLER_TEMPLATE,
            self.project_root.join("controllers").join(format!("{file}.go")),
        )
    }

    /// Default router file: `<project dir name>.go` in the project root
    #[must_use]
    pub fn default_router_file(&self) -> PathBuf {
        let name = self
            .project_root
            .file_name()
            .map_or_else(|| "main".to_string(), |name| name.to_string_lossy().into_owned());
        self.project_root.join(format!("{name}.go"))
    }

    /// Fail unless `<project root>/<dir>` exists
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingLayout`] if the directory is absent.
    pub fn require_dir(&self, dir: &str) -> Result<()> {
        require_dir(&self.project_root.join(dir))
    }
}

fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ScaffoldError::MissingLayout(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::field_type::{Hint, ResolvedType};
    use std::fs;
    use tempfile::tempdir;

    fn declarations(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_post_descriptor() {
        let descriptor = ModelDescriptor::new(
            "post",
            &declarations(&["Title:text", "Views:integer", "PublishedAt:datetime"]),
            "github.com/acme/blog",
        )
        .unwrap();

        assert_eq!(descriptor.names.model_name, "Post");
        assert_eq!(descriptor.names.model_name_plural, "Posts");
        assert_eq!(descriptor.names.instance_name, "post");
        assert_eq!(descriptor.package_name, "github.com/acme/blog");

        let title = &descriptor.fields["Title"];
        assert_eq!((&title.resolved_type, title.hint), (&ResolvedType::String, Hint::None));
        let views = &descriptor.fields["Views"];
        assert_eq!((&views.resolved_type, views.hint), (&ResolvedType::Int, Hint::None));
        let published = &descriptor.fields["PublishedAt"];
        assert_eq!(
            (&published.resolved_type, published.hint),
            (&ResolvedType::Int64, Hint::Temporal)
        );
    }

    #[test]
    fn test_descriptor_serializes_flat() {
        let descriptor =
            ModelDescriptor::new("post", &declarations(&["views:integer"]), "blog").unwrap();
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["model_name"], "Post");
        assert_eq!(value["underscore_name"], "post");
        assert_eq!(value["fields"]["Views"]["resolved_type"], "int");
        assert_eq!(value["fields"]["Views"]["hint"], "");
    }

    #[test]
    fn test_duplicate_label_keeps_last() {
        let descriptor =
            ModelDescriptor::new("post", &declarations(&["title:text", "Title:int32"]), "").unwrap();
        assert_eq!(descriptor.fields.len(), 1);
        assert_eq!(descriptor.fields["Title"].resolved_type, ResolvedType::Int32);
    }

    #[test]
    fn test_invalid_declarations() {
        assert!(ModelDescriptor::new("post", &declarations(&["title"]), "").is_err());
        assert!(matches!(
            ModelDescriptor::new("", &declarations(&["title:text"]), ""),
            Err(ScaffoldError::InvalidModelName(_))
        ));
    }

    #[test]
    fn test_model_and_controller_paths() {
        let descriptor =
            ModelDescriptor::new("blog_entry", &declarations(&["title:text"]), "").unwrap();
        let generator = ScaffoldGenerator::new(descriptor, PathBuf::from("/work/blog"));

        let jobs = generator.model_jobs();
        assert_eq!(jobs[0].output, PathBuf::from("/work/blog/models/blog_entry.go"));
        assert_eq!(jobs[0].template, MODEL_TEMPLATE);
        assert_eq!(
            jobs[1].output,
            PathBuf::from("/work/blog/models/blog_entry_dbsession.go")
        );
        assert_eq!(
            generator.controller_job().output,
            PathBuf::from("/work/blog/controllers/blog_entries.go")
        );
        assert_eq!(generator.default_router_file(), PathBuf::from("/work/blog/blog.go"));
    }

    #[test]
    fn test_require_dir() {
        let dir = tempdir().unwrap();
        let descriptor = ModelDescriptor::new("post", &[], "").unwrap();
        let generator = ScaffoldGenerator::new(descriptor, dir.path().to_path_buf());

        assert!(matches!(
            generator.require_dir("models"),
            Err(ScaffoldError::MissingLayout(_))
        ));
        fs::create_dir(dir.path().join("models")).unwrap();
        assert!(generator.require_dir("models").is_ok());
    }

    #[test]
    fn test_project_descriptor() {
        let project =
            ProjectDescriptor::new(PathBuf::from("/go/src/github.com/acme/blog"), "github.com/acme")
                .unwrap();
        assert_eq!(project.project_name, "blog");
        assert_eq!(project.database_name_prefix, "blog");
        assert_eq!(project.package_name, "github.com/acme/blog");

        let bare = ProjectDescriptor::new(PathBuf::from("/tmp/blog"), "").unwrap();
        assert_eq!(bare.package_name, "blog");
    }

    #[test]
    fn test_project_jobs() {
        let templates = tempdir().unwrap();
        fs::create_dir(templates.path().join("helpers")).unwrap();
        fs::write(templates.path().join("helpers/render.go.tmpl"), "").unwrap();
        fs::create_dir(templates.path().join("config")).unwrap();
        fs::write(templates.path().join("config/config.go.tmpl"), "").unwrap();

        let project = ProjectDescriptor::new(PathBuf::from("/work/blog"), "").unwrap();
        let jobs = project.jobs(&TemplateDir::new(templates.path()));

        assert_eq!(
            jobs,
            vec![
                TemplateJob::new("helpers/render.go.tmpl", "/work/blog/helpers/render.go"),
                TemplateJob::new("config/config.go.tmpl", "/work/blog/config/config.go"),
                TemplateJob::new(MAIN_TEMPLATE, "/work/blog/blog.go"),
            ]
        );
    }
}
