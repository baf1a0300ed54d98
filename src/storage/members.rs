//! Member repository for JSON storage
//!
//! Manages loading and saving members to members.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::DuesError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    #[serde(default)]
    members: Vec<Member>,
}

pub struct MemberRepository {
    path: PathBuf,
    members: RwLock<HashMap<MemberId, Member>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            members: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), DuesError> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut members = write_lock(&self.members)?;
        members.clear();
        for member in file_data.members {
            members.insert(member.id, member);
        }

        tracing::debug!(count = members.len(), "loaded members");
        Ok(())
    }

    pub fn save(&self) -> Result<(), DuesError> {
        let members = read_lock(&self.members)?;

        let mut list: Vec<_> = members.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &MemberData { members: list })
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, DuesError> {
        Ok(read_lock(&self.members)?.get(&id).cloned())
    }

    /// All members sorted by name
    pub fn get_all(&self) -> Result<Vec<Member>, DuesError> {
        let members = read_lock(&self.members)?;
        let mut list: Vec<_> = members.values().cloned().collect();
        list.sort_by_key(|m| m.name.to_lowercase());
        Ok(list)
    }

    /// Active members sorted by name
    pub fn get_active(&self) -> Result<Vec<Member>, DuesError> {
        let mut list = self.get_all()?;
        list.retain(|m| m.active);
        Ok(list)
    }

    /// Find a member by case-insensitive name or by ID (short or full form)
    pub fn find(&self, identifier: &str) -> Result<Option<Member>, DuesError> {
        let identifier = identifier.trim();
        let key = identifier.to_lowercase();
        let members = read_lock(&self.members)?;

        let by_name = members.values().find(|m| m.name.to_lowercase() == key);

        Ok(by_name
            .or_else(|| members.values().find(|m| m.id.matches(identifier)))
            .cloned())
    }

    /// Check whether another member already uses `name`
    pub fn name_exists(&self, name: &str, exclude: Option<MemberId>) -> Result<bool, DuesError> {
        let key = name.trim().to_lowercase();
        let members = read_lock(&self.members)?;
        Ok(members
            .values()
            .any(|m| Some(m.id) != exclude && m.name.to_lowercase() == key))
    }

    pub fn upsert(&self, member: Member) -> Result<(), DuesError> {
        write_lock(&self.members)?.insert(member.id, member);
        Ok(())
    }

    pub fn delete(&self, id: MemberId) -> Result<Option<Member>, DuesError> {
        Ok(write_lock(&self.members)?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, DuesError> {
        Ok(read_lock(&self.members)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn member(name: &str) -> Member {
        Member::monthly(
            name,
            Money::from_units(20),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    fn create_test_repo() -> (TempDir, MemberRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MemberRepository::new(temp_dir.path().join("members.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_load() {
        let (temp, repo) = create_test_repo();
        let alice = member("Alice");
        let id = alice.id;
        repo.upsert(alice).unwrap();
        repo.save().unwrap();

        let reloaded = MemberRepository::new(temp.path().join("members.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap().unwrap().name, "Alice");
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp, repo) = create_test_repo();
        let bob = member("Bob");
        let short_id = bob.id.to_string();
        repo.upsert(bob).unwrap();

        assert!(repo.find("bob").unwrap().is_some());
        assert!(repo.find(&short_id).unwrap().is_some());
        assert!(repo.find("Carol").unwrap().is_none());
    }

    #[test]
    fn test_name_exists() {
        let (_temp, repo) = create_test_repo();
        let alice = member("Alice");
        let id = alice.id;
        repo.upsert(alice).unwrap();

        assert!(repo.name_exists("ALICE", None).unwrap());
        assert!(!repo.name_exists("Alice", Some(id)).unwrap());
    }

    #[test]
    fn test_name_match_ignores_non_ascii_case() {
        let (_temp, repo) = create_test_repo();
        repo.upsert(member("Émile")).unwrap();

        assert!(repo.name_exists("émile", None).unwrap());
        assert!(repo.name_exists("ÉMILE", None).unwrap());
        assert_eq!(repo.find("émile").unwrap().unwrap().name, "Émile");
    }

    #[test]
    fn test_active_filter_and_sorting() {
        let (_temp, repo) = create_test_repo();
        let mut zed = member("zed");
        zed.deactivate();
        repo.upsert(member("Carol")).unwrap();
        repo.upsert(member("alice")).unwrap();
        repo.upsert(zed).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["alice", "Carol", "zed"]);
        assert_eq!(repo.get_active().unwrap().len(), 2);
    }
}
