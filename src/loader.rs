//! Loading raw template text from storage.
//!
//! The engine itself has no file or network awareness: a
//! [`TemplateLoader`] is the asynchronous collaborator that fetches
//! raw text by name, and the preload functions feed it into the
//! engine's registries. A failed load or parse is logged and skipped,
//! never aborting the rest of the batch; two concurrent loads of the
//! same name race and the last registration wins.
use crate::engine::Engine;
use crate::error::Error;

use async_trait::async_trait;
use std::path::PathBuf;

/// The standard decorative fragments preloaded for every page.
pub const DEFAULT_PARTIALS: &[&str] = &["header", "footer", "navigation"];

#[async_trait]
pub trait TemplateLoader: Send + Sync {
    async fn load(&self, name: &str) -> Result<String, Error>;
}

/// Loads `{name}.html` files from a directory.
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl TemplateLoader for DirLoader {
    async fn load(&self, name: &str) -> Result<String, Error> {
        let path = self.root.join(format!("{}.html", name));
        Ok(tokio::fs::read_to_string(path).await?)
    }
}

/// Load and register each named template. Returns how many registered.
pub async fn preload(engine: &Engine, loader: &dyn TemplateLoader, names: &[&str]) -> usize {
    let mut registered = 0;

    for &name in names {
        match loader.load(name).await {
            Ok(source) => match engine.register(name, &source) {
                Ok(()) => registered += 1,
                Err(err) => {
                    tracing::warn!(template = name, error = %err, "failed to compile template")
                }
            },
            Err(err) => tracing::warn!(template = name, error = %err, "could not load template"),
        }
    }

    registered
}

/// Load and register each named partial. Returns how many registered.
pub async fn preload_partials(
    engine: &Engine,
    loader: &dyn TemplateLoader,
    names: &[&str],
) -> usize {
    let mut registered = 0;

    for &name in names {
        match loader.load(name).await {
            Ok(source) => match engine.register_partial(name, &source) {
                Ok(()) => registered += 1,
                Err(err) => {
                    tracing::warn!(partial = name, error = %err, "failed to compile partial")
                }
            },
            Err(err) => tracing::warn!(partial = name, error = %err, "could not load partial"),
        }
    }

    registered
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[tokio::test]
    async fn test_dir_loader_preload() -> Result<(), Error> {
        let dir = TempDir::new("templates")?;
        fs::write(dir.path().join("hero.html"), "<h1>{{ title }}</h1>")?;
        fs::write(dir.path().join("header.html"), "<header>{{ site }}</header>")?;

        let engine = Engine::new();
        let loader = DirLoader::new(dir.path());

        // "missing" has no file; the batch continues past it.
        let registered = preload(&engine, &loader, &["hero", "missing"]).await;
        assert_eq!(registered, 1);

        let partials = preload_partials(&engine, &loader, &["header"]).await;
        assert_eq!(partials, 1);

        assert_eq!(
            engine.render("hero", [("title", "Projetos")])?,
            "<h1>Projetos</h1>"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_broken_template_is_skipped() -> Result<(), Error> {
        let dir = TempDir::new("templates")?;
        fs::write(dir.path().join("bad.html"), "oops {{ title")?;

        let engine = Engine::new();
        let loader = DirLoader::new(dir.path());

        assert_eq!(preload(&engine, &loader, &["bad"]).await, 0);
        assert!(engine.render("bad", &crate::Context::new()).is_err());

        Ok(())
    }
}
