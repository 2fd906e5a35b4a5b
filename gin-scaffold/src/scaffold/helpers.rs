//! Naming helpers for code generation
//!
//! This module derives the identifier family used by templates (type names,
//! instance names, file names) from a single base name. Inflection is
//! delegated to the `Inflector` crate.

use inflector::Inflector;
use serde::Serialize;

/// Naming conventions shared by templates and commands
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert to a Go exported type name (`PascalCase`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use gin_scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_type_name("post"), "Post");
    /// assert_eq!(TemplateHelpers::to_type_name("user_profile"), "UserProfile");
    /// ```
    #[must_use]
    pub fn to_type_name(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert to a Go local variable name (`camelCase`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use gin_scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_instance_name("Post"), "post");
    /// assert_eq!(TemplateHelpers::to_instance_name("UserProfile"), "userProfile");
    /// ```
    #[must_use]
    pub fn to_instance_name(input: &str) -> String {
        input.to_camel_case()
    }

    /// Convert to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use gin_scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::underscore("UserProfile"), "user_profile");
    /// ```
    #[must_use]
    pub fn underscore(input: &str) -> String {
        input.to_snake_case()
    }

    /// Pluralize a word
    ///
    /// # Note
    ///
    /// Irregular nouns may not round-trip through [`Self::singularize`].
    /// Model names are expected to be regular words.
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Singularize a word
    #[must_use]
    pub fn singularize(input: &str) -> String {
        input.to_singular()
    }
}

/// Identifier family derived from one model name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelNames {
    /// Name as given
    pub base_name: String,
    /// `Post`
    pub model_name: String,
    /// `Posts`
    pub model_name_plural: String,
    /// `post`
    pub instance_name: String,
    /// `posts`
    pub instance_name_plural: String,
    /// `post`, `user_profile`
    pub underscore_name: String,
}

impl ModelNames {
    /// Derive every name variant from a base name
    ///
    /// # Examples
    ///
    /// ```
    /// # use gin_scaffold::scaffold::helpers::ModelNames;
    /// let names = ModelNames::derive("user_profile");
    /// assert_eq!(names.model_name, "UserProfile");
    /// assert_eq!(names.model_name_plural, "UserProfiles");
    /// assert_eq!(names.instance_name, "userProfile");
    /// assert_eq!(names.instance_name_plural, "userProfiles");
    /// assert_eq!(names.underscore_name, "user_profile");
    /// ```
    #[must_use]
    pub fn derive(base_name: &str) -> Self {
        let model_name = TemplateHelpers::to_type_name(base_name);
        let instance_name = TemplateHelpers::to_instance_name(&model_name);

        Self {
            base_name: base_name.to_string(),
            model_name_plural: TemplateHelpers::pluralize(&model_name),
            instance_name_plural: TemplateHelpers::pluralize(&instance_name),
            underscore_name: TemplateHelpers::underscore(&model_name),
            model_name,
            instance_name,
        }
    }
}
