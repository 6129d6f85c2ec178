pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS scan_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    domain TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT,
    total_hosts INTEGER NOT NULL DEFAULT 0,
    total_shares INTEGER NOT NULL DEFAULT 0,
    total_sensitive_files INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'running'
);

CREATE TABLE IF NOT EXISTS shares (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL REFERENCES scan_sessions(id) ON DELETE CASCADE,
    hostname TEXT NOT NULL,
    share_name TEXT NOT NULL,
    access_level TEXT NOT NULL DEFAULT 'no_access',
    error_message TEXT,
    total_files INTEGER NOT NULL DEFAULT 0,
    total_dirs INTEGER NOT NULL DEFAULT 0,
    hidden_files INTEGER NOT NULL DEFAULT 0,
    scan_time TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sensitive_files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    share_id INTEGER NOT NULL REFERENCES shares(id) ON DELETE CASCADE,
    file_path TEXT NOT NULL,
    file_name TEXT NOT NULL,
    detection_type TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS root_files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    share_id INTEGER NOT NULL REFERENCES shares(id) ON DELETE CASCADE,
    file_name TEXT NOT NULL,
    file_type TEXT NOT NULL,
    file_size INTEGER NOT NULL DEFAULT 0,
    attributes TEXT NOT NULL DEFAULT '',
    created_time TEXT,
    modified_time TEXT
);

CREATE TABLE IF NOT EXISTS sensitive_patterns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern TEXT NOT NULL,
    detection_type TEXT NOT NULL,
    description TEXT,
    enabled INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_shares_session ON shares(session_id);
CREATE INDEX IF NOT EXISTS idx_shares_natural_key ON shares(hostname, share_name);
CREATE INDEX IF NOT EXISTS idx_sensitive_files_share ON sensitive_files(share_id);
CREATE INDEX IF NOT EXISTS idx_root_files_share ON root_files(share_id);
CREATE INDEX IF NOT EXISTS idx_sessions_status ON scan_sessions(status);
";
