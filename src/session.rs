//! Preview session: the context object every user action goes through.
//!
//! A [`PreviewSession`] owns the file set, the registry handle, the
//! compositor, the current-path pointer, the debouncer and both host
//! collaborators. Nothing is global, so independent sessions can coexist.
//!
//! Hosts translate UI events into [`Command`]s and feed them to
//! [`PreviewSession::dispatch`]:
//!
//! ```text
//! folder picker ─► ImportFolder ─┐
//! zip picker    ─► ImportArchive ┤   clear ─► populate ─► bootstrap ─► open ─► compose
//! tree / tabs   ─► OpenFile      ├─► open in editor
//! editor change ─► EditorChanged ├─► debounce
//! event loop    ─► Tick          ├─► sync editor ─► compose (once per burst)
//! clear button  ─► Clear         ┘   revoke all ─► blank surface
//! ```
//!
//! # Example
//!
//! ```
//! use live_preview::prelude::*;
//!
//! let mut session = PreviewSession::new(
//!     PreviewConfig::default(),
//!     BufferEditor::new(),
//!     MemorySurface::new(),
//! );
//! let event = session
//!     .dispatch(Command::ImportFolder(vec![
//!         ImportEntry::text("index.html", r#"<link href="style.css">"#),
//!         ImportEntry::text("style.css", "body{color:red}"),
//!     ]))
//!     .unwrap();
//! assert_eq!(event, Event::Composed { generation: 1 });
//! ```

mod debounce;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

pub use debounce::Debouncer;

use crate::compose::{Compositor, Generation};
use crate::config::PreviewConfig;
use crate::error::ImportError;
use crate::file::{FileOrigin, FileRecord, VirtualFileSet};
use crate::host::{BufferEditor, Editor, MemorySurface, PreviewSurface, SyntaxMode};
use crate::import::{self, read_archive, read_dir, ArchiveReader, ImportEntry};
use crate::resource::ResourceRegistry;

// =============================================================================
// Commands and Events
// =============================================================================

/// A discrete user action.
pub enum Command {
    /// Replace the file set with a folder selection.
    ImportFolder(Vec<ImportEntry>),
    /// Replace the file set with the contents of an archive.
    ImportArchive(Box<dyn ArchiveReader>),
    /// Open a file in the editor.
    OpenFile(String),
    /// The editor text changed at the given instant.
    EditorChanged {
        /// When the change happened.
        at: Instant,
    },
    /// Time advanced; fires a pending debounced rebuild when due.
    Tick {
        /// Current instant.
        now: Instant,
    },
    /// Rebuild the preview immediately.
    Refresh,
    /// Drop everything and blank the preview.
    Clear,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new generation was installed.
    Composed {
        /// Number of the installed generation.
        generation: u64,
    },
    /// No entry document; the previous preview stays.
    NoEntry,
    /// A file was opened in the editor.
    Opened {
        /// Logical path of the opened file.
        path: String,
    },
    /// A rebuild is scheduled.
    Scheduled {
        /// When the rebuild fires.
        deadline: Instant,
    },
    /// Nothing to do.
    Idle,
    /// The session was cleared.
    Cleared,
}

// =============================================================================
// PreviewSession
// =============================================================================

/// Owns all preview state for one user session.
pub struct PreviewSession<E = BufferEditor, S = MemorySurface> {
    config: PreviewConfig,
    registry: Arc<ResourceRegistry>,
    files: VirtualFileSet,
    current_path: Option<String>,
    compositor: Compositor,
    debouncer: Debouncer,
    editor: E,
    surface: S,
}

impl<E: Editor, S: PreviewSurface> PreviewSession<E, S> {
    /// Create an empty session with its own registry.
    pub fn new(config: PreviewConfig, editor: E, surface: S) -> Self {
        Self::with_registry(config, Arc::new(ResourceRegistry::new()), editor, surface)
    }

    /// Create an empty session allocating from a shared registry.
    pub fn with_registry(
        config: PreviewConfig,
        registry: Arc<ResourceRegistry>,
        editor: E,
        surface: S,
    ) -> Self {
        Self {
            compositor: Compositor::new(registry.clone(), &config),
            debouncer: Debouncer::new(config.debounce),
            config,
            registry,
            files: VirtualFileSet::new(),
            current_path: None,
            editor,
            surface,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Session configuration.
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// The registry handles are allocated from.
    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    /// The virtual file set.
    pub fn files(&self) -> &VirtualFileSet {
        &self.files
    }

    /// Path of the file open in the editor.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// The installed generation.
    pub fn generation(&self) -> Option<&Generation> {
        self.compositor.active()
    }

    /// The editor collaborator.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access to the editor, for hosts that type into it.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Apply one command.
    ///
    /// Only imports can fail.
    pub fn dispatch(&mut self, command: Command) -> Result<Event, ImportError> {
        match command {
            Command::ImportFolder(entries) => self.import_folder(entries),
            Command::ImportArchive(mut reader) => self.import_archive(&mut *reader),
            Command::OpenFile(path) => Ok(self.open_file(&path)),
            Command::EditorChanged { at } => Ok(self.editor_changed(at)),
            Command::Tick { now } => Ok(self.tick(now)),
            Command::Refresh => Ok(self.refresh()),
            Command::Clear => Ok(self.clear()),
        }
    }

    /// Load the default documents if the set is empty, open the entry and
    /// compose.
    pub fn start(&mut self) -> Event {
        self.post_import()
    }

    // -------------------------------------------------------------------------
    // Imports
    // -------------------------------------------------------------------------

    /// Replace the file set with a folder selection.
    pub fn import_folder(&mut self, entries: Vec<ImportEntry>) -> Result<Event, ImportError> {
        self.clear();
        info!("importing {} folder entries", entries.len());
        self.populate(entries, FileOrigin::Folder)
    }

    /// Replace the file set with the files under an on-disk directory.
    pub fn import_dir(&mut self, root: &Path) -> Result<Event, ImportError> {
        self.clear();
        info!("importing directory {}", root.display());
        let entries = read_dir(root)?;
        self.populate(entries, FileOrigin::Folder)
    }

    /// Replace the file set with the leaf entries of an archive.
    pub fn import_archive<A>(&mut self, reader: &mut A) -> Result<Event, ImportError>
    where
        A: ArchiveReader + ?Sized,
    {
        self.clear();
        let entries = read_archive(reader)?;
        info!("importing {} archive entries", entries.len());
        self.populate(entries, FileOrigin::Archive)
    }

    /// Replace the file set with the contents of a zip archive.
    #[cfg(feature = "zip")]
    pub fn import_zip(&mut self, bytes: Vec<u8>) -> Result<Event, ImportError> {
        self.clear();
        let mut reader = import::ZipArchiveReader::new(bytes)?;
        let entries = read_archive(&mut reader)?;
        info!("importing {} zip entries", entries.len());
        self.populate(entries, FileOrigin::Archive)
    }

    fn populate(
        &mut self,
        entries: Vec<ImportEntry>,
        origin: FileOrigin,
    ) -> Result<Event, ImportError> {
        let count = import::populate(&mut self.files, &self.registry, entries, origin)?;
        debug!("populated {count} files");
        Ok(self.post_import())
    }

    fn post_import(&mut self) -> Event {
        if self.files.bootstrap() {
            info!("file set empty, loaded default documents");
        }
        let first = self
            .files
            .entry_path(&self.config.entry_name)
            .or_else(|| self.files.code_paths().first().copied())
            .map(str::to_string);
        if let Some(path) = first {
            self.open_file(&path);
        }
        self.refresh()
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Open a text file in the editor.
    ///
    /// Unknown paths, binary files and the file already open are ignored.
    /// Pending edits to the previous file are written back first.
    pub fn open_file(&mut self, path: &str) -> Event {
        if self.current_path.as_deref() == Some(path) {
            return Event::Idle;
        }
        if !self.files.get(path).is_some_and(|record| !record.is_binary()) {
            return Event::Idle;
        }
        if self.debouncer.is_pending() {
            self.sync_editor();
        }

        let text = self.files.get(path).and_then(FileRecord::as_text).unwrap_or_default();
        self.editor.set_value(text);
        self.editor.set_syntax_mode(SyntaxMode::for_path(path));
        self.current_path = Some(path.to_string());
        Event::Opened {
            path: path.to_string(),
        }
    }

    /// Note an editor change; the rebuild waits for the debounce delay.
    pub fn editor_changed(&mut self, at: Instant) -> Event {
        Event::Scheduled {
            deadline: self.debouncer.trigger(at),
        }
    }

    /// Fire the pending rebuild if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Event {
        if self.debouncer.fire(now) {
            self.sync_editor();
            return self.refresh();
        }
        match self.debouncer.deadline() {
            Some(deadline) => Event::Scheduled { deadline },
            None => Event::Idle,
        }
    }

    /// Write the editor text into the record at the current path.
    fn sync_editor(&mut self) {
        if let Some(path) = &self.current_path {
            self.files.set_text(path, self.editor.value());
        }
    }

    // -------------------------------------------------------------------------
    // Composition
    // -------------------------------------------------------------------------

    /// Rebuild the preview from the current file set.
    pub fn refresh(&mut self) -> Event {
        match self.compositor.compose(&self.files, &mut self.surface) {
            Some(generation) => Event::Composed {
                generation: generation.number(),
            },
            None => Event::NoEntry,
        }
    }

    /// Revoke every handle, empty the file set and blank the surface.
    pub fn clear(&mut self) -> Event {
        self.debouncer.cancel();
        self.compositor.retire(&mut self.surface);

        let records = self.files.take_all();
        self.registry
            .revoke_all(records.iter().filter_map(FileRecord::handle));

        self.current_path = None;
        self.editor.set_value(&self.config.empty_editor_text);
        self.editor.set_syntax_mode(SyntaxMode::default());
        info!("session cleared ({} files dropped)", records.len());
        Event::Cleared
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use super::*;
    use crate::file::{DEFAULT_ENTRY_HTML, DEFAULT_FILES};
    use crate::import::MapArchive;

    fn session() -> PreviewSession {
        PreviewSession::new(PreviewConfig::default(), BufferEditor::new(), MemorySurface::new())
    }

    /// Live handles equal the installed generation's handles.
    fn assert_no_dangling(session: &PreviewSession) {
        let generation = session.generation().unwrap();
        assert_eq!(session.registry().live_count(), generation.handle_count());
    }

    #[test]
    fn test_start_bootstraps_defaults() {
        let mut session = session();
        assert_eq!(session.start(), Event::Composed { generation: 1 });

        assert_eq!(session.files().len(), DEFAULT_FILES.len());
        assert_eq!(session.current_path(), Some("index.html"));
        assert_eq!(session.editor().value(), DEFAULT_ENTRY_HTML);
        assert_eq!(session.editor().mode(), SyntaxMode::Html);

        let generation = session.generation().unwrap();
        for path in ["style.css", "script.js"] {
            let url = generation.asset(path).unwrap().url();
            assert!(generation.markup().contains(url), "{path} not rewritten");
        }
        assert_eq!(session.surface().source(), Some(generation.root()));
        assert_no_dangling(&session);
    }

    #[test]
    fn test_import_end_to_end() {
        let mut session = session();
        let event = session
            .dispatch(Command::ImportFolder(vec![
                ImportEntry::text("index.html", r#"<link href="style.css">"#),
                ImportEntry::text("style.css", "body{color:red}"),
            ]))
            .unwrap();
        assert_eq!(event, Event::Composed { generation: 1 });

        let root = session.surface().source().unwrap();
        let markup = session.registry().fetch(root).unwrap().text().unwrap().to_string();
        let href = markup
            .split("href=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        let css = session.registry().fetch_url(href).unwrap();
        assert_eq!(css.text(), Some("body{color:red}"));
        assert_eq!(css.mime(), "text/css");
    }

    #[test]
    fn test_binary_handle_stable_and_no_dangling() {
        let mut session = session();
        session
            .import_folder(vec![
                ImportEntry::text("site/index.html", r#"<img src="img/logo.png">"#),
                ImportEntry::bytes("site/img/logo.png", vec![0x89, b'P', b'N', b'G']),
                ImportEntry::text("site/app.js", "1"),
            ])
            .unwrap();

        let logo = session.files().get("site/img/logo.png").unwrap().handle().cloned().unwrap();
        for _ in 0..4 {
            session.refresh();
            let generation = session.generation().unwrap();
            assert_eq!(generation.asset("site/img/logo.png"), Some(&logo));
            assert!(generation.markup().contains(logo.url()));
            assert_no_dangling(&session);
        }
        assert_eq!(session.generation().unwrap().number(), 5);
    }

    #[test]
    fn test_clear_resets_fully() {
        let mut session = session();
        session
            .import_folder(vec![
                ImportEntry::text("index.html", "<p>"),
                ImportEntry::bytes("a.gif", vec![1u8, 2]),
            ])
            .unwrap();
        assert!(session.registry().live_count() > 0);

        assert_eq!(session.dispatch(Command::Clear).unwrap(), Event::Cleared);
        assert!(session.files().is_empty());
        assert_eq!(session.current_path(), None);
        assert_eq!(session.registry().live_count(), 0);
        assert_eq!(session.surface().source(), None);
        assert!(session.generation().is_none());
        assert_eq!(session.editor().value(), session.config().empty_editor_text);

        // A later import behaves like a fresh session
        session
            .import_folder(vec![ImportEntry::text("index.html", "<p>again</p>")])
            .unwrap();
        assert_eq!(session.files().len(), 1);
        assert_eq!(session.current_path(), Some("index.html"));
        assert_no_dangling(&session);
    }

    #[test]
    fn test_debounce_coalesces_edits() {
        let mut session = session();
        session
            .import_folder(vec![ImportEntry::text("index.html", "<p>start</p>")])
            .unwrap();
        let t0 = Instant::now();

        for i in 0..5u64 {
            session.editor_mut().set_value(&format!("<p>{i}</p>"));
            let event = session
                .dispatch(Command::EditorChanged {
                    at: t0 + Duration::from_millis(i * 100),
                })
                .unwrap();
            assert!(matches!(event, Event::Scheduled { .. }));
        }

        let due = t0 + Duration::from_millis(900);
        assert_eq!(
            session.tick(t0 + Duration::from_millis(899)),
            Event::Scheduled { deadline: due }
        );
        assert_eq!(session.generation().unwrap().number(), 1);

        assert_eq!(session.tick(due), Event::Composed { generation: 2 });
        assert_eq!(session.tick(t0 + Duration::from_secs(5)), Event::Idle);
        assert_eq!(session.generation().unwrap().number(), 2);

        assert_eq!(session.files().get("index.html").unwrap().as_text(), Some("<p>4</p>"));
        assert!(session.generation().unwrap().markup().contains("<p>4</p>"));
        assert_no_dangling(&session);
    }

    #[test]
    fn test_open_file_rules() {
        let mut session = session();
        session
            .import_folder(vec![
                ImportEntry::text("index.html", "<p>"),
                ImportEntry::text("css/site.css", "a{}"),
                ImportEntry::bytes("logo.png", vec![0u8]),
            ])
            .unwrap();

        assert_eq!(session.open_file("logo.png"), Event::Idle);
        assert_eq!(session.open_file("missing.js"), Event::Idle);
        assert_eq!(session.open_file("index.html"), Event::Idle);
        assert_eq!(
            session.open_file("css/site.css"),
            Event::Opened {
                path: "css/site.css".into()
            }
        );
        assert_eq!(session.editor().mode(), SyntaxMode::Css);
        assert_eq!(session.editor().value(), "a{}");
    }

    #[test]
    fn test_switching_files_keeps_pending_edit() {
        let mut session = session();
        session
            .import_folder(vec![
                ImportEntry::text("index.html", "<p>"),
                ImportEntry::text("app.js", "old"),
            ])
            .unwrap();
        let t0 = Instant::now();

        session.open_file("app.js");
        session.editor_mut().set_value("new");
        session.editor_changed(t0);
        session.open_file("index.html");

        assert_eq!(session.files().get("app.js").unwrap().as_text(), Some("new"));
        assert_eq!(session.tick(t0 + Duration::from_secs(1)), Event::Composed { generation: 2 });
        assert_eq!(session.files().get("index.html").unwrap().as_text(), Some("<p>"));
    }

    #[test]
    fn test_failed_import_keeps_partial_state() {
        let mut session = session();
        session.start();

        let err = session
            .import_folder(vec![
                ImportEntry::text("index.html", "<p>new</p>"),
                ImportEntry::bytes("bad.js", vec![0xc3, 0x28]),
            ])
            .unwrap_err();
        assert!(matches!(err, ImportError::Decode { .. }));

        // Cleared eagerly, populated up to the failure, nothing composed
        assert_eq!(session.files().sorted_paths(), vec!["index.html"]);
        assert!(session.generation().is_none());
        assert_eq!(session.surface().source(), None);
        assert_eq!(session.registry().live_count(), 0);
    }

    #[test]
    fn test_archive_import() {
        let mut archive = MapArchive::new();
        archive.insert_dir("proj/");
        archive.insert("proj/index.html", r#"<script src="./js/main.js"></script>"#);
        archive.insert_dir("proj/js/");
        archive.insert("proj/js/main.js", "run()");

        let mut session = session();
        let event = session.dispatch(Command::ImportArchive(Box::new(archive))).unwrap();
        assert_eq!(event, Event::Composed { generation: 1 });

        let generation = session.generation().unwrap();
        assert_eq!(generation.entry(), "proj/index.html");
        let js = generation.asset("proj/js/main.js").unwrap();
        assert!(generation.markup().contains(&format!(r#"src="{}""#, js.url())));
        assert!(session.files().records().all(|r| r.origin() == FileOrigin::Archive));
    }

    #[test]
    fn test_empty_archive_bootstraps() {
        let mut archive = MapArchive::new();
        archive.insert_dir("empty/");

        let mut session = session();
        session.import_archive(&mut archive).unwrap();
        assert_eq!(session.files().len(), DEFAULT_FILES.len());
        assert!(session.files().records().all(|r| r.origin() == FileOrigin::Bootstrap));
    }

    #[test]
    fn test_missing_entry_keeps_editor_open() {
        let mut session = session();
        let event = session
            .import_folder(vec![
                ImportEntry::text("notes.txt", "n"),
                ImportEntry::text("b.js", "b"),
                ImportEntry::text("a.css", "a"),
            ])
            .unwrap();

        assert_eq!(event, Event::NoEntry);
        assert_eq!(session.current_path(), Some("a.css"));
        assert_eq!(session.surface().installs(), 0);
    }

    #[test]
    fn test_entry_matches_name_suffix() {
        let mut session = session();
        let event = session
            .import_folder(vec![ImportEntry::text("myindex.html", "<p>x</p>")])
            .unwrap();

        assert_eq!(event, Event::Composed { generation: 1 });
        assert_eq!(session.generation().unwrap().entry(), "myindex.html");
        assert_eq!(session.current_path(), Some("myindex.html"));
    }

    #[test]
    fn test_import_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("index.html"), r#"<img src="img/dot.bmp">"#).unwrap();
        fs::write(dir.path().join("img/dot.bmp"), [0x42u8, 0x4d]).unwrap();

        let mut session = session();
        session.import_dir(dir.path()).unwrap();

        let generation = session.generation().unwrap();
        let bmp = generation.asset("img/dot.bmp").unwrap();
        assert!(generation.markup().contains(bmp.url()));
        assert_eq!(session.registry().fetch(bmp).unwrap().bytes(), &[0x42, 0x4d]);
    }

    #[cfg(feature = "zip")]
    #[test]
    fn test_import_garbage_zip_clears_first() {
        let mut session = session();
        session.start();

        let err = session.import_zip(b"PK-not-really".to_vec()).unwrap_err();
        assert!(matches!(err, ImportError::Archive { .. }));
        assert!(session.files().is_empty());
        assert_eq!(session.registry().live_count(), 0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = session();
        let mut second = session();
        first.start();
        second.start();

        let a = first.generation().unwrap().root().clone();
        let b = second.generation().unwrap().root().clone();
        assert_ne!(a, b);

        first.clear();
        assert!(second.registry().is_live(&b));
        assert_no_dangling(&second);
    }

    #[test]
    fn test_clear_on_shared_registry_spares_other_session() {
        let registry = Arc::new(ResourceRegistry::new());
        let new_session = || {
            PreviewSession::with_registry(
                PreviewConfig::default(),
                registry.clone(),
                BufferEditor::new(),
                MemorySurface::new(),
            )
        };
        let mut first = new_session();
        let mut second = new_session();
        first
            .import_folder(vec![
                ImportEntry::text("index.html", "<p>"),
                ImportEntry::bytes("a.gif", vec![1u8]),
            ])
            .unwrap();
        second
            .import_folder(vec![
                ImportEntry::text("index.html", "<p>"),
                ImportEntry::bytes("b.gif", vec![2u8]),
            ])
            .unwrap();

        first.clear();
        let generation = second.generation().unwrap();
        assert!(generation.assets().values().all(|h| registry.is_live(h)));
        assert!(registry.is_live(generation.root()));
        assert_eq!(registry.live_count(), generation.handle_count());
    }
}
