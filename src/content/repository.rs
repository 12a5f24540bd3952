//! Content repository - read-only queries over the content directory
//!
//! Every query goes back to disk: directories are re-scanned and files
//! re-parsed on each call, so results always reflect the current state of
//! the content root. Nothing is cached between calls.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::{Document, FrontMatter};

/// Default blog collection under the content root
pub const BLOG_COLLECTION: &str = "blog";

/// Default markdown extension
pub const MARKDOWN_EXTENSION: &str = "md";

/// Loads markdown documents from a content root
#[derive(Debug, Clone)]
pub struct ContentRepository {
    root: PathBuf,
    blog_dir: String,
    extensions: Vec<String>,
}

impl ContentRepository {
    /// Create a repository over `root` with the default layout
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            blog_dir: BLOG_COLLECTION.to_string(),
            extensions: vec![MARKDOWN_EXTENSION.to_string()],
        }
    }

    /// Use a different collection for blog posts
    pub fn with_blog_dir(mut self, blog_dir: impl Into<String>) -> Self {
        self.blog_dir = blog_dir.into();
        self
    }

    /// Recognize these markdown extensions (leading dots are ignored).
    /// An empty list keeps the current extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Content root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collection holding blog posts
    pub fn blog_dir(&self) -> &str {
        &self.blog_dir
    }

    /// Filenames of markdown files directly inside a collection, sorted.
    ///
    /// An empty collection name lists the content root itself. A missing
    /// directory yields an empty list.
    pub fn list_markdown_filenames(&self, collection: &str) -> Result<Vec<String>> {
        let dir = self.collection_dir(collection);
        match stat(&dir)? {
            Some(meta) if meta.is_dir() => {}
            _ => {
                tracing::debug!("Collection {:?} does not exist", dir);
                return Ok(Vec::new());
            }
        }

        let mut filenames = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| ContentError::Read {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
                source: io::Error::from(e),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            // Non UTF-8 names cannot produce a string slug
            let Some(name) = entry.file_name().to_str() else {
                tracing::debug!("Skipping non UTF-8 filename {:?}", entry.path());
                continue;
            };
            if self.strip_extension(name).is_some() {
                filenames.push(name.to_string());
            }
        }

        filenames.sort();
        tracing::debug!("Found {} markdown files in {:?}", filenames.len(), dir);
        Ok(filenames)
    }

    /// Read and parse one file of a collection
    pub fn parse_document(&self, collection: &str, filename: &str) -> Result<Document> {
        let path = self.collection_dir(collection).join(filename);
        let slug = self.strip_extension(filename).unwrap_or(filename);
        load_document(&path, slug)
    }

    /// Every blog post, newest first.
    ///
    /// Posts without a parseable date come last; equal dates are ordered
    /// by slug ascending.
    pub fn list_all_posts(&self) -> Result<Vec<Document>> {
        let mut posts = self
            .list_markdown_filenames(&self.blog_dir)?
            .iter()
            .map(|filename| self.parse_document(&self.blog_dir, filename))
            .collect::<Result<Vec<_>>>()?;

        // Reverse puts `None` after every `Some`
        posts.sort_by_cached_key(|post| (Reverse(post.date()), post.slug.clone()));

        tracing::debug!("Loaded {} posts", posts.len());
        Ok(posts)
    }

    /// The blog post whose slug is `slug`, if any
    pub fn get_post_by_slug(&self, slug: &str) -> Result<Option<Document>> {
        let filenames = self.list_markdown_filenames(&self.blog_dir)?;
        match filenames
            .iter()
            .find(|f| self.strip_extension(f) == Some(slug))
        {
            Some(filename) => self.parse_document(&self.blog_dir, filename).map(Some),
            None => Ok(None),
        }
    }

    /// Distinct tags across all posts, sorted ascending
    pub fn list_all_tags(&self) -> Result<Vec<String>> {
        let tags: BTreeSet<String> = self
            .list_all_posts()?
            .into_iter()
            .flat_map(|post| post.front_matter.tags)
            .collect();
        Ok(tags.into_iter().collect())
    }

    /// Posts carrying `tag` exactly, newest first
    pub fn list_posts_by_tag(&self, tag: &str) -> Result<Vec<Document>> {
        Ok(self
            .list_all_posts()?
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect())
    }

    /// A singleton page (`<root>/<page_name>.md`), if present.
    ///
    /// Names that would leave the content root are treated as absent.
    pub fn get_page(&self, page_name: &str) -> Result<Option<Document>> {
        if !is_plain_name(page_name) {
            tracing::debug!("Rejecting page name {:?}", page_name);
            return Ok(None);
        }

        for ext in &self.extensions {
            let path = self.root.join(format!("{}.{}", page_name, ext));
            if let Some(meta) = stat(&path)? {
                if meta.is_file() {
                    return load_document(&path, page_name).map(Some);
                }
            }
        }

        Ok(None)
    }

    /// The `limit` newest posts
    pub fn recent_posts(&self, limit: usize) -> Result<Vec<Document>> {
        let mut posts = self.list_all_posts()?;
        posts.truncate(limit);
        Ok(posts)
    }

    /// Up to `limit` other posts sharing a tag with `slug`, newest first
    pub fn related_posts(&self, slug: &str, limit: usize) -> Result<Vec<Document>> {
        let posts = self.list_all_posts()?;
        let Some(current) = posts.iter().find(|p| p.slug == slug) else {
            return Ok(Vec::new());
        };

        Ok(posts
            .iter()
            .filter(|p| p.slug != slug && p.shares_tag_with(current))
            .take(limit)
            .cloned()
            .collect())
    }

    /// Number of posts per tag, sorted by tag
    pub fn tag_counts(&self) -> Result<Vec<(String, usize)>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for post in self.list_all_posts()? {
            let tags: BTreeSet<String> = post.front_matter.tags.into_iter().collect();
            for tag in tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    /// Names of the singleton pages at the content root, sorted
    pub fn list_page_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_markdown_filenames("")?
            .iter()
            .filter_map(|f| self.strip_extension(f))
            .map(str::to_string)
            .collect())
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        if collection.is_empty() {
            self.root.clone()
        } else {
            self.root.join(collection)
        }
    }

    /// Filename without a recognized markdown extension
    fn strip_extension<'f>(&self, filename: &'f str) -> Option<&'f str> {
        self.extensions.iter().find_map(|ext| {
            filename
                .strip_suffix(ext.as_str())
                .and_then(|stem| stem.strip_suffix('.'))
                .filter(|stem| !stem.is_empty())
        })
    }
}

/// Read a file and split it into a document
fn load_document(path: &Path, slug: &str) -> Result<Document> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (front_matter, body) = FrontMatter::parse(&raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Loaded {:?} as {:?}", path, slug);
    Ok(Document::new(slug, front_matter, body))
}

/// Metadata for `path`, or `None` when nothing exists there
fn stat(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ContentError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// A single path component that is not `.` or `..`
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
