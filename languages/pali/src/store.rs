use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use vacana_core::dictionary::{DictEntry, Dictionary, DictionaryMetadata, LoadError, PartOfSpeech};

/// Traditional names of the ten verb classes, keyed by `dpd_roots.root_group`
const ROOT_GROUP_NAMES: [(&str, &str); 10] = [
    ("1", "bhvādi"),
    ("2", "adādi"),
    ("3", "juhotyādi"),
    ("4", "divādi"),
    ("5", "svādi"),
    ("6", "tudādi"),
    ("7", "rudhādi"),
    ("8", "tanādi"),
    ("9", "kryādi"),
    ("10", "curādi"),
];

/// Tables the store cannot work without. `dpd_roots` is optional; a store
/// lacking it just loses the verb-class labels.
const REQUIRED_TABLES: [&str; 2] = ["lookup", "dpd_headwords"];

/// Placeholder strings the dataset uses for "no value"
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "N/A" && v != "---" && v != "—")
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

/// Read-only view over the Digital Pali Dictionary SQLite artifact.
///
/// Resolution order inside the store: the `lookup` table maps an inflected
/// surface form to headword ids whose metadata is merged; a form with no
/// `lookup` row is tried as a headword (`lemma_1`) directly.
pub struct DpdStore {
    conn: Connection,
    path: PathBuf,
}

impl DpdStore {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| LoadError::InvalidFormat(e.to_string()))?;

        let store = Self::from_connection(conn, path.to_path_buf())?;
        tracing::info!("Opened DPD store at: {}", path.display());
        Ok(store)
    }

    pub(crate) fn from_connection(conn: Connection, path: PathBuf) -> Result<Self, LoadError> {
        Self::validate(&conn)?;
        Ok(Self { conn, path })
    }

    /// A file that opens but lacks the expected tables is treated as
    /// unavailable, same as a missing file.
    fn validate(conn: &Connection) -> Result<(), LoadError> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")
            .map_err(|e| LoadError::InvalidFormat(e.to_string()))?;

        let tables: HashSet<String> = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect())
            .map_err(|e| LoadError::InvalidFormat(e.to_string()))?;

        for required in REQUIRED_TABLES {
            if !tables.contains(required) {
                return Err(LoadError::InvalidFormat(format!(
                    "missing table: {required}"
                )));
            }
        }

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_lookup(&self, query: &str) -> rusqlite::Result<Option<DictEntry>> {
        let lookup_row: Option<(Option<String>, Option<String>)> = self
            .conn
            .query_row(
                "SELECT headwords, grammar FROM lookup WHERE lookup_key = ?1",
                [query],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match lookup_row {
            Some((headwords, grammar)) => self.resolve_lookup_row(query, headwords, grammar),
            None => self.lookup_headword_direct(query),
        }
    }

    /// Merge the headwords an inflected form points at into one entry
    fn resolve_lookup_row(
        &self,
        query: &str,
        headwords: Option<String>,
        grammar: Option<String>,
    ) -> rusqlite::Result<Option<DictEntry>> {
        // grammar holds [lemma, pos, morphology] triples for the inflected form
        let mut pos_list = Vec::new();
        let mut morph_list = Vec::new();
        if let Some(raw) = grammar {
            if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(&raw) {
                for item in items {
                    if let serde_json::Value::Array(triple) = item {
                        if triple.len() >= 3 {
                            if let Some(pos) = triple[1].as_str().filter(|s| !s.is_empty()) {
                                pos_list.push(pos.to_string());
                            }
                            if let Some(morph) = triple[2].as_str().filter(|s| !s.is_empty()) {
                                morph_list.push(morph.to_string());
                            }
                        }
                    }
                }
            }
        }

        let headword_ids: Vec<i64> = headwords
            .and_then(|raw| serde_json::from_str::<Vec<serde_json::Value>>(&raw).ok())
            .map(|values| values.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();
        let headword_ids = {
            let mut seen = HashSet::new();
            headword_ids
                .into_iter()
                .filter(|id| seen.insert(*id))
                .collect::<Vec<_>>()
        };

        let mut meanings = Vec::new();
        let mut lemmas = Vec::new();
        let mut headword_pos = Vec::new();
        let mut headword_morph = Vec::new();
        let mut root_key = String::new();
        let mut root_sign = String::new();
        let mut sanskrit = None;

        for id in &headword_ids {
            let row: Option<HeadwordRow> = self
                .conn
                .query_row(
                    "SELECT lemma_1, pos, grammar, meaning_1, meaning_2, meaning_lit,
                            sanskrit, root_key, root_sign
                     FROM dpd_headwords WHERE id = ?1",
                    [id],
                    HeadwordRow::from_row,
                )
                .optional()?;

            let Some(row) = row else { continue };

            if let Some(meaning) = row.merged_meaning() {
                meanings.push(meaning);
            }
            if let Some(lemma) = clean(row.lemma_1.clone()) {
                lemmas.push(lemma);
            }
            if let Some(pos) = clean(row.pos.clone()) {
                headword_pos.push(pos);
            }
            if let Some(morph) = clean(row.grammar.clone()) {
                headword_morph.push(morph);
            }
            if root_key.is_empty() {
                if let Some(key) = clean(row.root_key.clone()) {
                    root_key = key;
                    root_sign = clean(row.root_sign.clone()).unwrap_or_default();
                }
            }
            if sanskrit.is_none() {
                sanskrit = clean(row.sanskrit.clone());
            }
        }

        let meanings = dedupe(meanings);
        let lemmas = dedupe(lemmas);
        let meaning = if meanings.is_empty() {
            lemmas.join("; ")
        } else {
            meanings.join("; ")
        };
        if meaning.is_empty() {
            return Ok(None);
        }

        let pos_tags = {
            let merged = dedupe(pos_list);
            if merged.is_empty() {
                dedupe(headword_pos)
            } else {
                merged
            }
        };
        let morphology = {
            let merged = dedupe(morph_list);
            if merged.is_empty() {
                dedupe(headword_morph)
            } else {
                merged
            }
        }
        .join("; ");

        let root_group = self.fetch_root_group(&root_key, &root_sign)?;
        let root = build_root_label(&root_sign, &root_key, &root_group);

        Ok(Some(DictEntry {
            headword: lemmas
                .first()
                .cloned()
                .unwrap_or_else(|| query.to_string()),
            part_of_speech: pos_tags
                .first()
                .map(|tag| PartOfSpeech::from_tag(tag))
                .unwrap_or_else(|| PartOfSpeech::Other(String::new())),
            morphology,
            meaning,
            translation: None,
            root,
            sanskrit,
        }))
    }

    /// Direct headword match for forms the lookup table does not list
    fn lookup_headword_direct(&self, query: &str) -> rusqlite::Result<Option<DictEntry>> {
        let row: Option<HeadwordRow> = self
            .conn
            .query_row(
                "SELECT lemma_1, pos, grammar, meaning_1, meaning_2, meaning_lit,
                        sanskrit, root_key, root_sign
                 FROM dpd_headwords WHERE lower(lemma_1) = ?1 LIMIT 1",
                [query],
                HeadwordRow::from_row,
            )
            .optional()?;

        let Some(row) = row else { return Ok(None) };
        let Some(meaning) = row.merged_meaning() else {
            return Ok(None);
        };

        let root_key = clean(row.root_key.clone()).unwrap_or_default();
        let root_sign = clean(row.root_sign.clone()).unwrap_or_default();
        let root_group = self.fetch_root_group(&root_key, &root_sign)?;

        Ok(Some(DictEntry {
            headword: clean(row.lemma_1.clone()).unwrap_or_else(|| query.to_string()),
            part_of_speech: clean(row.pos.clone())
                .map(|tag| PartOfSpeech::from_tag(&tag))
                .unwrap_or_else(|| PartOfSpeech::Other(String::new())),
            morphology: clean(row.grammar.clone()).unwrap_or_default(),
            meaning,
            translation: None,
            root: build_root_label(&root_sign, &root_key, &root_group),
            sanskrit: clean(row.sanskrit.clone()),
        }))
    }

    /// Verb class (1-10) for a root, preferring the row whose sign matches.
    /// Stores without a `dpd_roots` table simply yield no class.
    fn fetch_root_group(&self, root_key: &str, root_sign: &str) -> rusqlite::Result<String> {
        if root_key.is_empty() {
            return Ok(String::new());
        }

        let result = self.conn.query_row(
            "SELECT root_group FROM dpd_roots WHERE root = ?1
             ORDER BY CASE WHEN root_sign = ?2 THEN 0 ELSE 1 END LIMIT 1",
            [root_key, root_sign],
            |row| row.get::<_, Option<String>>(0),
        );

        match result {
            Ok(group) => Ok(clean(group).unwrap_or_default()),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(String::new()),
            Err(rusqlite::Error::SqliteFailure(_, _)) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}

impl Dictionary for DpdStore {
    fn lookup_exact(&self, query: &str) -> Option<DictEntry> {
        match self.try_lookup(query) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("DPD store query failed for {query:?}: {e}");
                None
            }
        }
    }

    fn metadata(&self) -> DictionaryMetadata {
        let entry_count = self
            .conn
            .query_row("SELECT COUNT(*) FROM dpd_headwords", [], |row| {
                row.get::<_, i64>(0)
            })
            .unwrap_or(0) as usize;

        DictionaryMetadata {
            name: format!("dpd.db ({})", self.path.display()),
            language: "pi".to_string(),
            entry_count,
        }
    }
}

struct HeadwordRow {
    lemma_1: Option<String>,
    pos: Option<String>,
    grammar: Option<String>,
    meaning_1: Option<String>,
    meaning_2: Option<String>,
    meaning_lit: Option<String>,
    sanskrit: Option<String>,
    root_key: Option<String>,
    root_sign: Option<String>,
}

impl HeadwordRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            lemma_1: row.get(0)?,
            pos: row.get(1)?,
            grammar: row.get(2)?,
            meaning_1: row.get(3)?,
            meaning_2: row.get(4)?,
            meaning_lit: row.get(5)?,
            sanskrit: row.get(6)?,
            root_key: row.get(7)?,
            root_sign: row.get(8)?,
        })
    }

    /// meaning_1, else meaning_2, with the literal meaning appended
    fn merged_meaning(&self) -> Option<String> {
        let base = clean(self.meaning_1.clone()).or_else(|| clean(self.meaning_2.clone()));
        let lit = clean(self.meaning_lit.clone());

        match (base, lit) {
            (Some(base), Some(lit)) => Some(format!("{base} ({lit})")),
            (Some(base), None) => Some(base),
            (None, Some(lit)) => Some(lit),
            (None, None) => None,
        }
    }
}

/// Root label as shown in gloss output: sign + root, with the verb class
/// and its traditional name when known, e.g. "√gam 1 (bhvādi)".
fn build_root_label(root_sign: &str, root_key: &str, root_group: &str) -> Option<String> {
    if root_key.is_empty() {
        return None;
    }

    let base = format!("{root_sign}{root_key}");
    if root_group.is_empty() {
        return Some(base);
    }

    let class_name = ROOT_GROUP_NAMES
        .iter()
        .find(|(group, _)| *group == root_group)
        .map(|(_, name)| *name);

    // Some root keys already end with the class digit
    if base.trim().ends_with(&format!(" {root_group}")) {
        return Some(match class_name {
            Some(name) => format!("{base} ({name})"),
            None => base,
        });
    }

    Some(match class_name {
        Some(name) => format!("{base} · {root_group} ({name})"),
        None => format!("{base} · {root_group}"),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) const SCHEMA: &str = "
        CREATE TABLE lookup (lookup_key TEXT PRIMARY KEY, headwords TEXT, grammar TEXT);
        CREATE TABLE dpd_headwords (
            id INTEGER PRIMARY KEY,
            lemma_1 TEXT, pos TEXT, grammar TEXT,
            meaning_1 TEXT, meaning_2 TEXT, meaning_lit TEXT,
            sanskrit TEXT, root_key TEXT, root_sign TEXT
        );
        CREATE TABLE dpd_roots (root TEXT, root_sign TEXT, root_group TEXT);
    ";

    pub(crate) fn populate(conn: &Connection) {
        conn.execute_batch(SCHEMA).expect("schema");
        conn.execute_batch(
            r#"
            INSERT INTO dpd_headwords VALUES
                (1, 'dhamma 1', 'masc', 'masc', 'nature; teaching', '', '', 'dharma', 'dhar', '√'),
                (2, 'dhamma 2', 'masc', 'masc', '', 'doctrine', '', 'dharma', 'dhar', '√'),
                (3, 'buddha 1', 'masc', 'masc', 'awakened one', '', 'one who knows', 'buddha', 'budh', '√'),
                (4, 'gacchati', 'pr', 'pr 3rd sg', 'goes; moves', '', '', 'gacchati', 'gam', '√');
            INSERT INTO lookup VALUES
                ('dhammo', '[1, 2]', '[["dhamma 1", "masc", "nom sg"], ["dhamma 2", "masc", "nom sg"]]'),
                ('buddho', '[3]', '[["buddha 1", "masc", "nom sg"]]');
            INSERT INTO dpd_roots VALUES
                ('dhar', '√', '1'),
                ('budh', '√', '4'),
                ('gam', '√', '1');
            "#,
        )
        .expect("rows");
    }

    pub(crate) fn mini_store() -> DpdStore {
        let conn = Connection::open_in_memory().expect("in-memory db");
        populate(&conn);
        DpdStore::from_connection(conn, PathBuf::from(":memory:")).expect("valid store")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::mini_store;
    use super::*;

    #[test]
    fn inflected_form_resolves_via_lookup_table() {
        let store = mini_store();
        let entry = store.lookup_exact("dhammo").expect("found");

        assert_eq!(entry.headword, "dhamma 1");
        assert_eq!(entry.part_of_speech, PartOfSpeech::Noun);
        assert_eq!(entry.morphology, "nom sg");
        assert_eq!(entry.meaning, "nature; teaching; doctrine");
        assert_eq!(entry.sanskrit.as_deref(), Some("dharma"));
    }

    #[test]
    fn literal_meaning_is_appended() {
        let store = mini_store();
        let entry = store.lookup_exact("buddho").expect("found");
        assert_eq!(entry.meaning, "awakened one (one who knows)");
    }

    #[test]
    fn headword_without_lookup_row_matches_directly() {
        let store = mini_store();
        let entry = store.lookup_exact("gacchati").expect("found");

        assert_eq!(entry.part_of_speech, PartOfSpeech::Verb);
        assert_eq!(entry.meaning, "goes; moves");
        assert_eq!(entry.root.as_deref(), Some("√gam · 1 (bhvādi)"));
    }

    #[test]
    fn absent_word_is_a_miss_not_an_error() {
        let store = mini_store();
        assert!(store.lookup_exact("qwerty").is_none());
    }

    #[test]
    fn store_without_required_tables_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE unrelated (x TEXT)").unwrap();

        let result = DpdStore::from_connection(conn, PathBuf::from(":memory:"));
        assert!(matches!(result, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let result = DpdStore::open(Path::new("/nonexistent/dpd.db"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn root_label_shapes() {
        assert_eq!(build_root_label("√", "gam", "1").as_deref(), Some("√gam · 1 (bhvādi)"));
        assert_eq!(build_root_label("√", "gam 1", "1").as_deref(), Some("√gam 1 (bhvādi)"));
        assert_eq!(build_root_label("", "kar", "").as_deref(), Some("kar"));
        assert_eq!(build_root_label("√", "", "1"), None);
    }

    #[test]
    fn metadata_reports_entry_count() {
        let store = mini_store();
        let meta = store.metadata();
        assert_eq!(meta.language, "pi");
        assert_eq!(meta.entry_count, 4);
    }
}
