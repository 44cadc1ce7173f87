//! Theme engine
//!
//! This module provides template rendering using Tera.
//! Features:
//! - Loading every `.html` template of the active theme
//! - Standard template variables
//! - Fallback to an error page when rendering fails

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};

mod error;

pub use error::ThemeError;

/// Theme engine for rendering templates
pub struct ThemeEngine {
    /// Tera template engine instance
    tera: Tera,
    /// Path to themes directory
    themes_path: PathBuf,
    /// Active theme name
    theme: String,
}

impl ThemeEngine {
    /// Create a theme engine for `theme` under `themes_path`.
    ///
    /// Fails with [`ThemeError::NotFound`] when the theme directory is
    /// missing, or [`ThemeError::TemplateError`] when a template does not
    /// parse.
    pub fn new(themes_path: &Path, theme: &str) -> Result<Self> {
        let mut engine = Self {
            tera: Tera::default(),
            themes_path: themes_path.to_path_buf(),
            theme: theme.to_string(),
        };
        engine.reload_templates()?;

        tracing::info!(
            "Loaded theme '{}' with {} template(s)",
            engine.theme,
            engine.tera.get_template_names().count()
        );
        Ok(engine)
    }

    /// Re-read all templates of the active theme from disk
    fn reload_templates(&mut self) -> Result<()> {
        let theme_path = self.theme_path();
        if !theme_path.is_dir() {
            return Err(ThemeError::NotFound(self.theme.clone()).into());
        }

        let mut templates: Vec<(String, String)> = Vec::new();
        collect_templates_from_dir(&theme_path, &theme_path, &mut templates)?;

        // Base templates go first so children can extend them
        templates.sort_by(|a, b| {
            let a_is_base = a.0 == "base.html" || a.0.ends_with("/base.html");
            let b_is_base = b.0 == "base.html" || b.0.ends_with("/base.html");
            b_is_base.cmp(&a_is_base).then_with(|| a.0.cmp(&b.0))
        });

        let mut tera = Tera::default();
        for (name, content) in templates {
            tera.add_raw_template(&name, &content).map_err(|e| {
                ThemeError::TemplateError(format!("Failed to add template {}: {}", name, e))
            })?;
        }
        tera.build_inheritance_chains().map_err(|e| {
            ThemeError::TemplateError(format!("Failed to build template inheritance: {}", e))
        })?;

        self.tera = tera;
        Ok(())
    }

    /// Render a template with context
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String> {
        self.tera.render(template, context).map_err(|e| {
            let mut error_msg = format!("Failed to render '{}': {}", template, e);
            let mut source = e.source();
            while let Some(s) = source {
                error_msg.push_str(&format!("\n  Caused by: {}", s));
                source = s.source();
            }
            ThemeError::TemplateError(error_msg).into()
        })
    }

    /// Render a template with the standard variables added to `context`
    pub fn render_with_standard_vars(
        &self,
        template: &str,
        context: &TeraContext,
        standard_vars: &StandardTemplateVars,
    ) -> Result<String> {
        self.render(template, &self.with_standard_vars(context, standard_vars))
    }

    /// Render a page for a response. Same as [`render_with_standard_vars`]
    /// but never fails, see [`render_with_fallback`].
    ///
    /// [`render_with_standard_vars`]: Self::render_with_standard_vars
    /// [`render_with_fallback`]: Self::render_with_fallback
    pub fn render_page(
        &self,
        template: &str,
        context: &TeraContext,
        standard_vars: &StandardTemplateVars,
    ) -> String {
        self.render_with_fallback(template, &self.with_standard_vars(context, standard_vars))
    }

    fn with_standard_vars(
        &self,
        context: &TeraContext,
        standard_vars: &StandardTemplateVars,
    ) -> TeraContext {
        let mut full_context = context.clone();
        full_context.insert("site_name", &standard_vars.site_name);
        full_context.insert("site_description", &standard_vars.site_description);
        full_context.insert("request_path", &standard_vars.request_path);
        full_context.insert("theme_name", &self.theme);
        full_context.insert("year", &standard_vars.year);
        full_context
    }

    /// Render a template, falling back to `error.html` and then to a plain
    /// HTML page. Always produces markup.
    pub fn render_with_fallback(&self, template: &str, context: &TeraContext) -> String {
        match self.render(template, context) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(
                    "Failed to render template '{}': {}, trying error template",
                    template,
                    e
                );

                let mut error_context = context.clone();
                error_context.insert("error_message", &e.to_string());
                error_context.insert("requested_template", template);

                match self.render("error.html", &error_context) {
                    Ok(html) => html,
                    Err(error_template_err) => {
                        tracing::warn!(
                            "Failed to render error template: {}, returning simple HTML error page",
                            error_template_err
                        );
                        Self::simple_error_page(template, &e.to_string())
                    }
                }
            }
        }
    }

    /// Last-resort page when neither the requested nor the error template renders
    fn simple_error_page(template: &str, error: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>خطأ في القالب</title>
    <style>
        body {{ font-family: Tahoma, sans-serif; max-width: 600px; margin: 50px auto; padding: 20px; background: #f5f5f5; }}
        .error-box {{ background: white; border-right: 4px solid #e74c3c; padding: 20px; border-radius: 4px; }}
        h1 {{ color: #e74c3c; margin-top: 0; }}
        .details {{ margin-top: 15px; padding-top: 15px; border-top: 1px solid #eee; color: #666; font-size: 0.9em; direction: ltr; text-align: left; }}
    </style>
</head>
<body>
    <div class="error-box">
        <h1>حدث خطأ أثناء عرض الصفحة</h1>
        <div class="details">
            <code>{}</code><br>
            {}
        </div>
    </div>
</body>
</html>"#,
            tera::escape_html(template),
            tera::escape_html(error)
        )
    }

    /// Whether the active theme defines `template`
    pub fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template)
    }

    /// Active theme name
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Directory of the active theme
    pub fn theme_path(&self) -> PathBuf {
        self.themes_path.join(&self.theme)
    }

    /// Static assets of the active theme, served under `/static/`
    pub fn static_dir(&self) -> PathBuf {
        self.theme_path().join("static")
    }
}

/// Collect `.html` files below `current_path`, named relative to `base_path`
fn collect_templates_from_dir(
    base_path: &Path,
    current_path: &Path,
    templates: &mut Vec<(String, String)>,
) -> Result<()> {
    if !current_path.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(current_path).map_err(ThemeError::IoError)? {
        let path = entry.map_err(ThemeError::IoError)?.path();

        if path.is_dir() {
            collect_templates_from_dir(base_path, &path, templates)?;
        } else if path.extension().map_or(false, |ext| ext == "html") {
            let relative_path = path
                .strip_prefix(base_path)
                .map_err(|_| ThemeError::TemplateError("Failed to get relative path".to_string()))?;
            let template_name = relative_path.to_string_lossy().replace('\\', "/");
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template: {:?}", path))?;

            templates.push((template_name, content));
        }
    }

    Ok(())
}

/// Variables every page receives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTemplateVars {
    pub site_name: String,
    pub site_description: String,
    /// Current request path, used for active navigation links
    pub request_path: String,
    /// Current year (for copyright)
    pub year: i32,
}

impl StandardTemplateVars {
    pub fn new(
        site_name: impl Into<String>,
        site_description: impl Into<String>,
        request_path: impl Into<String>,
    ) -> Self {
        Self {
            site_name: site_name.into(),
            site_description: site_description.into(),
            request_path: request_path.into(),
            year: chrono::Utc::now().year(),
        }
    }
}
