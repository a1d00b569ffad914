//! Standard-library classification of root module names

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::model::root_module;

/// Classification of a root module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleClass {
    Stdlib,
    ThirdParty,
}

impl fmt::Display for ModuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleClass::Stdlib => f.write_str("stdlib"),
            ModuleClass::ThirdParty => f.write_str("thirdParty"),
        }
    }
}

/// Top-level modules shipped with CPython 3.x.
const PYTHON_STDLIB: &[&str] = &[
    "__future__", "__main__", "_thread", "abc", "aifc", "argparse", "array", "ast",
    "asynchat", "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii",
    "binhex", "bisect", "builtins", "bz2", "cProfile", "calendar", "cgi", "cgitb", "chunk",
    "cmath", "cmd", "code", "codecs", "codeop", "collections", "colorsys", "compileall",
    "concurrent", "configparser", "contextlib", "contextvars", "copy", "copyreg", "crypt",
    "csv", "ctypes", "curses", "dataclasses", "datetime", "dbm", "decimal", "difflib", "dis",
    "distutils", "doctest", "email", "encodings", "ensurepip", "enum", "errno",
    "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch", "formatter", "fractions",
    "ftplib", "functools", "gc", "genericpath", "getopt", "getpass", "gettext", "glob",
    "graphlib", "grp", "gzip", "hashlib", "heapq", "hmac", "html", "http", "idlelib",
    "imaplib", "imghdr", "imp", "importlib", "inspect", "io", "ipaddress", "itertools",
    "json", "keyword", "lib2to3", "linecache", "locale", "logging", "lzma", "mailbox",
    "mailcap", "marshal", "math", "mimetypes", "mmap", "modulefinder", "msilib", "msvcrt",
    "multiprocessing", "netrc", "nis", "nntplib", "ntpath", "numbers", "opcode", "operator",
    "optparse", "os", "ossaudiodev", "parser", "pathlib", "pdb", "pickle", "pickletools",
    "pipes", "pkgutil", "platform", "plistlib", "poplib", "posix", "posixpath", "pprint",
    "profile", "pstats", "pty", "pwd", "py_compile", "pyclbr", "pydoc", "pydoc_data",
    "pyexpat", "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
    "rlcompleter", "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex",
    "shutil", "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver",
    "spwd", "sqlite3", "sre_compile", "sre_constants", "sre_parse", "ssl", "stat",
    "statistics", "string", "stringprep", "struct", "subprocess", "sunau", "symbol",
    "symtable", "sys", "sysconfig", "syslog", "tabnanny", "tarfile", "telnetlib", "tempfile",
    "termios", "textwrap", "this", "threading", "time", "timeit", "tkinter", "token",
    "tokenize", "tomllib", "trace", "traceback", "tracemalloc", "tty", "turtle",
    "turtledemo", "types", "typing", "unicodedata", "unittest", "urllib", "uu", "uuid",
    "venv", "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound", "wsgiref",
    "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib", "zoneinfo",
];

static PYTHON: LazyLock<StdlibCatalogue> = LazyLock::new(|| StdlibCatalogue {
    names: PYTHON_STDLIB.iter().copied().collect(),
});

/// Immutable set of standard-library root modules.
///
/// There is no write path; callers hold a `&'static` reference obtained from
/// [`StdlibCatalogue::python`] and pass it to whatever needs to classify.
#[derive(Debug)]
pub struct StdlibCatalogue {
    names: HashSet<&'static str>,
}

impl StdlibCatalogue {
    /// The CPython standard-library catalogue.
    pub fn python() -> &'static StdlibCatalogue {
        &PYTHON
    }

    /// Whether the root of `name` is a standard-library module.
    /// Never fails; empty and unknown names are third-party.
    pub fn is_standard_library(&self, name: &str) -> bool {
        let root = root_module(name.trim());
        !root.is_empty() && self.names.contains(root)
    }

    pub fn classify(&self, name: &str) -> ModuleClass {
        if self.is_standard_library(name) {
            ModuleClass::Stdlib
        } else {
            ModuleClass::ThirdParty
        }
    }

    /// Partition names into (stdlib, third-party), keeping input order within
    /// each side.
    pub fn split<I, S>(&self, names: I) -> (Vec<String>, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stdlib = Vec::new();
        let mut third_party = Vec::new();
        for name in names {
            let name = name.as_ref();
            if self.is_standard_library(name) {
                stdlib.push(name.to_string());
            } else {
                third_party.push(name.to_string());
            }
        }
        (stdlib, third_party)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Shorthand for `StdlibCatalogue::python().is_standard_library(name)`.
pub fn is_standard_library(name: &str) -> bool {
    StdlibCatalogue::python().is_standard_library(name)
}
