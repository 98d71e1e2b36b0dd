/*!
Loading the native library, and the process-wide cache of the loaded library.

# Discovery

The file name of the library is fixed by [Platform], e.g. `libz3.so` on Linux.
Candidates are tried once each, in the order given by [candidates]:
1. An explicit path from the [LibraryConfig], if given, and nothing else.
   A directory is taken to contain the library.
2. Otherwise, the current directory.
3. The `lib` directory beside the executable.
4. The `lib` directory of the installation prefix of the executable (`<exe dir>/../lib`).
5. The file name alone, left to the system loader (if [system_fallback](LibraryConfig::system_fallback) is set).

# The process cache

[init] loads and caches a library, and the first successful load wins.
After this, [init] returns the cached library regardless of the requested path, and there is no way to unload or reload the library.

[library] returns the cached library, or attempts discovery with [LibraryConfig::from_env] if nothing is cached.
A failure of this implicit discovery is reported as [UsageError::NotInitialised](crate::types::err::UsageError::NotInitialised), as some library should have been loaded before use.

# Substitutes

A library may also be built from an in-process [FunctionTable] with [Z3Library::from_table].
This is used to test the adapter without a native library, though any table with the declared signatures will do.
*/

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use crate::{
    config::LibraryConfig,
    misc::log::targets::{self},
    sys::{FunctionTable, SilentTable},
    types::err::{self, ErrorKind, LoadError},
};

mod silent;
pub use silent::{NativeConfig, Version};

/// The base name of the native library, without prefix or suffix.
pub const LIBRARY_NAME: &str = "z3";

/// Platforms, as far as the file name of the native library is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    /// The platform of the current build.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    /// The file extension of a shared library.
    pub fn suffix(&self) -> &'static str {
        match self {
            Platform::Windows => "dll",
            Platform::MacOs => "dylib",
            Platform::Unix => "so",
        }
    }

    /// The file name of the native library.
    pub fn file_name(&self) -> String {
        format!("lib{LIBRARY_NAME}.{}", self.suffix())
    }
}

/// The candidate paths for the native library, in the order they should be tried.
pub fn candidates(config: &LibraryConfig, platform: Platform) -> Vec<PathBuf> {
    let file_name = platform.file_name();

    if let Some(path) = &config.path {
        return match path.is_dir() {
            true => vec![path.join(&file_name)],
            false => vec![path.clone()],
        };
    }

    let mut candidates = vec![PathBuf::from(".").join(&file_name)];

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("lib").join(&file_name));
        candidates.push(exe_dir.join("..").join("lib").join(&file_name));
    }

    if config.system_fallback {
        candidates.push(PathBuf::from(&file_name));
    }

    candidates
}

/// Where the entries of a library came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// A shared library at the given path.
    Path(PathBuf),

    /// An in-process table.
    Substitute,
}

/// A loaded native library, or a substitute for one.
pub struct Z3Library {
    table: FunctionTable,

    origin: Origin,

    /// Serialises silent calls, which may touch process-global native state.
    global: Mutex<()>,

    /// Kept to keep the entries of `table` valid.
    _library: Option<libloading::Library>,
}

impl std::fmt::Debug for Z3Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Z3Library")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl Z3Library {
    /// Opens the library at `path`, or in `path` if `path` is a directory, and resolves every entry.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let path = match path.is_dir() {
            true => path.join(Platform::current().file_name()),
            false => path.to_path_buf(),
        };

        log::debug!(target: targets::LOADER, "Opening {}", path.display());

        // Safety: Initialisation routines of the library are run here, and nothing further can be checked.
        let library = unsafe { libloading::Library::new(&path) }.map_err(|e| LoadError::Open {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        // Safety: The library is taken to be a Z3 library, and the signatures of the table follow its interface.
        let table = unsafe { FunctionTable::resolve(&library) }?;

        log::info!(target: targets::LOADER, "Loaded {}", path.display());

        Ok(Z3Library {
            table,
            origin: Origin::Path(path),
            global: Mutex::new(()),
            _library: Some(library),
        })
    }

    /// Tries each of the [candidates] once, in order, and returns the first library opened.
    pub fn discover(config: &LibraryConfig) -> Result<Self, LoadError> {
        let mut attempts = Vec::default();

        for candidate in candidates(config, Platform::current()) {
            match Z3Library::open(&candidate) {
                Ok(library) => return Ok(library),
                Err(e) => {
                    log::debug!(target: targets::LOADER, "Skipping {}: {e}", candidate.display());
                    attempts.push(err::LoadAttempt {
                        path: candidate,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(LoadError::NotFound { attempts })
    }

    /// A library whose entries are those of `table`.
    pub fn from_table(table: FunctionTable) -> Self {
        Z3Library {
            table,
            origin: Origin::Substitute,
            global: Mutex::new(()),
            _library: None,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub(crate) fn table(&self) -> &FunctionTable {
        &self.table
    }

    fn global_guard(&self) -> MutexGuard<'_, ()> {
        self.global.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls a silent entry, without any register read.
    pub(crate) fn silent<R>(&self, operation: &'static str, call: impl FnOnce(&SilentTable) -> R) -> R {
        let _guard = self.global_guard();
        log::trace!(target: targets::ADAPTER, "{operation}");
        call(&self.table.silent)
    }
}

static LIBRARY: OnceLock<Arc<Z3Library>> = OnceLock::new();

/// Held while loading, so that concurrent calls to [init] load at most once.
static LOADING: Mutex<()> = Mutex::new(());

/// Loads and caches the native library, following the discovery order for `config`.
///
/// If a library is already cached it is returned, and `config` is ignored.
pub fn init(config: &LibraryConfig) -> Result<Arc<Z3Library>, ErrorKind> {
    let _loading = LOADING.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(library) = LIBRARY.get() {
        if let (Some(requested), Origin::Path(loaded)) = (&config.path, library.origin()) {
            if !loaded.starts_with(requested) {
                log::warn!(target: targets::LOADER,
                    "Ignoring request to load {}, as {} is loaded",
                    requested.display(),
                    loaded.display()
                );
            }
        }
        return Ok(library.clone());
    }

    let library = Arc::new(Z3Library::discover(config)?);
    Ok(LIBRARY.get_or_init(|| library).clone())
}

/// Caches `library`, unless some library is already cached, and returns the cached library.
pub fn install(library: Z3Library) -> Arc<Z3Library> {
    let _loading = LOADING.lock().unwrap_or_else(PoisonError::into_inner);
    LIBRARY.get_or_init(|| Arc::new(library)).clone()
}

/// The cached library, if any.
pub fn loaded() -> Option<Arc<Z3Library>> {
    LIBRARY.get().cloned()
}

/// The cached library, discovering a library from the environment if none is cached.
pub fn library() -> Result<Arc<Z3Library>, ErrorKind> {
    if let Some(library) = LIBRARY.get() {
        return Ok(library.clone());
    }

    match init(&LibraryConfig::from_env()) {
        Ok(library) => Ok(library),
        Err(e) => {
            log::warn!(target: targets::LOADER, "Implicit load failed: {e}");
            Err(err::UsageError::NotInitialised.into())
        }
    }
}
