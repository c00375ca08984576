use std::fs;
use std::io;
use std::path::PathBuf;

/// The two-valued display mode. Persisted as the literal strings `light`
/// and `dark`; anything else on disk is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }
}

/// Where the preference is persisted. Injected so tests can run against an
/// in-memory slot instead of the user's config directory.
pub trait ThemeBackend {
    /// `None` means no stored value (or an unreadable/invalid one).
    fn load(&self) -> Option<ThemePreference>;
    fn store(&self, pref: ThemePreference) -> io::Result<()>;
}

/// File-backed storage: a fixed file under the per-user config directory
/// whose entire content is `light` or `dark`.
pub struct FileThemeBackend {
    path: PathBuf,
}

impl FileThemeBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location, next to `settings.json`.
    pub fn default_path() -> Self {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("scanbar");
        path.push("theme");
        Self { path }
    }
}

impl ThemeBackend for FileThemeBackend {
    fn load(&self) -> Option<ThemePreference> {
        let contents = fs::read_to_string(&self.path).ok()?;
        ThemePreference::parse(&contents)
    }

    fn store(&self, pref: ThemePreference) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, pref.as_str())
    }
}

type Observer = Box<dyn FnMut(ThemePreference)>;

/// Single source of truth for the display mode.
///
/// Constructed once at startup and owned by the application state. Every
/// change runs the same two side effects, in order: persist to the backend,
/// notify observers so they can restyle the widget tree. A backend that
/// fails to persist downgrades the store to in-memory for the session; it
/// never aborts construction or toggling.
pub struct ThemeStore {
    current: ThemePreference,
    backend: Box<dyn ThemeBackend>,
    observers: Vec<Observer>,
}

impl ThemeStore {
    pub fn new(backend: Box<dyn ThemeBackend>) -> Self {
        let current = backend.load().unwrap_or_default();
        let store = Self {
            current,
            backend,
            observers: Vec::new(),
        };
        // The initializing read counts as a change: write the resolved value
        // back so a fresh profile ends up with an explicit `light` on disk.
        store.persist();
        store
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Register an observer. It is invoked immediately with the current
    /// value, then synchronously on every subsequent change.
    pub fn subscribe(&mut self, mut observer: impl FnMut(ThemePreference) + 'static) {
        observer(self.current);
        self.observers.push(Box::new(observer));
    }

    /// Flip light <-> dark, persist, then notify observers.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        self.persist();
        self.notify();
        self.current
    }

    fn persist(&self) {
        if let Err(e) = self.backend.store(self.current) {
            eprintln!("Failed to persist theme preference: {}. Continuing in-memory.", e);
        }
    }

    fn notify(&mut self) {
        let value = self.current;
        for observer in &mut self.observers {
            observer(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory backend storing the raw on-disk representation, so tests
    /// can assert on exactly what would be persisted.
    #[derive(Clone, Default)]
    struct MemoryBackend {
        slot: Rc<RefCell<Option<String>>>,
    }

    impl ThemeBackend for MemoryBackend {
        fn load(&self) -> Option<ThemePreference> {
            self.slot
                .borrow()
                .as_deref()
                .and_then(ThemePreference::parse)
        }

        fn store(&self, pref: ThemePreference) -> io::Result<()> {
            *self.slot.borrow_mut() = Some(pref.as_str().to_string());
            Ok(())
        }
    }

    struct FailingBackend;

    impl ThemeBackend for FailingBackend {
        fn load(&self) -> Option<ThemePreference> {
            None
        }

        fn store(&self, _pref: ThemePreference) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_defaults_to_light_with_empty_backend() {
        let store = ThemeStore::new(Box::new(MemoryBackend::default()));
        assert_eq!(store.current(), ThemePreference::Light);
    }

    #[test]
    fn test_initializing_read_writes_back() {
        let backend = MemoryBackend::default();
        let _store = ThemeStore::new(Box::new(backend.clone()));
        assert_eq!(backend.slot.borrow().as_deref(), Some("light"));
    }

    #[test]
    fn test_persistence_round_trip() {
        let backend = MemoryBackend::default();
        *backend.slot.borrow_mut() = Some("dark".to_string());

        let store = ThemeStore::new(Box::new(backend));
        assert_eq!(store.current(), ThemePreference::Dark);
    }

    #[test]
    fn test_invalid_stored_value_falls_back_to_default() {
        let backend = MemoryBackend::default();
        *backend.slot.borrow_mut() = Some("solarized".to_string());

        let store = ThemeStore::new(Box::new(backend));
        assert_eq!(store.current(), ThemePreference::Light);
    }

    #[test]
    fn test_toggle_alternates_strictly() {
        let mut store = ThemeStore::new(Box::new(MemoryBackend::default()));
        assert_eq!(store.toggle(), ThemePreference::Dark);
        assert_eq!(store.toggle(), ThemePreference::Light);
        assert_eq!(store.toggle(), ThemePreference::Dark);
        assert_eq!(store.toggle(), ThemePreference::Light);
    }

    #[test]
    fn test_double_toggle_is_involution() {
        let mut store = ThemeStore::new(Box::new(MemoryBackend::default()));
        let before = store.current();
        store.toggle();
        store.toggle();
        assert_eq!(store.current(), before);
    }

    #[test]
    fn test_three_way_consistency_after_toggle() {
        let backend = MemoryBackend::default();
        let observed = Rc::new(RefCell::new(None));

        let mut store = ThemeStore::new(Box::new(backend.clone()));
        let seen = observed.clone();
        store.subscribe(move |pref| *seen.borrow_mut() = Some(pref));

        for _ in 0..3 {
            let value = store.toggle();
            assert_eq!(store.current(), value);
            assert_eq!(backend.slot.borrow().as_deref(), Some(value.as_str()));
            assert_eq!(*observed.borrow(), Some(value));
        }
    }

    #[test]
    fn test_subscribe_fires_immediately() {
        let observed = Rc::new(RefCell::new(None));
        let mut store = ThemeStore::new(Box::new(MemoryBackend::default()));

        let seen = observed.clone();
        store.subscribe(move |pref| *seen.borrow_mut() = Some(pref));
        assert_eq!(*observed.borrow(), Some(ThemePreference::Light));
    }

    #[test]
    fn test_storage_failure_degrades_to_in_memory() {
        let mut store = ThemeStore::new(Box::new(FailingBackend));
        assert_eq!(store.current(), ThemePreference::Light);
        assert_eq!(store.toggle(), ThemePreference::Dark);
        assert_eq!(store.toggle(), ThemePreference::Light);
    }

    #[test]
    fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileThemeBackend::new(dir.path().join("nested").join("theme"));

        assert!(backend.load().is_none());
        backend.store(ThemePreference::Dark).unwrap();
        assert_eq!(backend.load(), Some(ThemePreference::Dark));
        assert_eq!(
            fs::read_to_string(dir.path().join("nested").join("theme")).unwrap(),
            "dark"
        );
    }

    #[test]
    fn test_file_backend_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "not-a-theme").unwrap();

        let backend = FileThemeBackend::new(path);
        assert!(backend.load().is_none());
    }

    #[test]
    fn test_preference_parse_trims_whitespace() {
        assert_eq!(ThemePreference::parse("dark\n"), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse("  light "), Some(ThemePreference::Light));
        assert_eq!(ThemePreference::parse("DARK"), None);
    }
}
