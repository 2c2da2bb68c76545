pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    birthday DATE NOT NULL,
    additional_data TEXT
);

CREATE INDEX IF NOT EXISTS idx_contacts_first_name ON contacts(first_name);
CREATE INDEX IF NOT EXISTS idx_contacts_last_name ON contacts(last_name);
CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email);
"#;

/// Column list shared by every statement that hands back a full row.
pub const CONTACT_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, birthday, additional_data";
