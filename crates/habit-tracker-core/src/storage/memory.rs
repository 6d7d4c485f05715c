//! In-memory record store.
//!
//! Same contract as [`HabitDb`](super::HabitDb) without a file; nothing
//! survives the process. Useful for tests and dry runs.

use std::collections::BTreeMap;

use super::{HabitSort, RecordStore, SortOrder};
use crate::error::PersistenceError;
use crate::habit::{Completion, Habit};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    habits: BTreeMap<String, Habit>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert_habit(&mut self, habit: &Habit) -> Result<(), PersistenceError> {
        if self.habits.contains_key(&habit.id) {
            return Err(PersistenceError::QueryFailed(format!(
                "habit {} already exists",
                habit.id
            )));
        }
        self.habits.insert(habit.id.clone(), habit.clone());
        Ok(())
    }

    fn get_habit(&self, id: &str) -> Result<Option<Habit>, PersistenceError> {
        Ok(self.habits.get(id).cloned())
    }

    fn list_habits(
        &self,
        sort: HabitSort,
        order: SortOrder,
    ) -> Result<Vec<Habit>, PersistenceError> {
        let mut habits: Vec<Habit> = self.habits.values().cloned().collect();
        match sort {
            HabitSort::CreatedAt => {
                habits.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            }
            HabitSort::Time => habits.sort_by(|a, b| {
                a.time
                    .cmp(&b.time)
                    .then_with(|| a.created_at.cmp(&b.created_at))
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
        if order == SortOrder::Descending {
            habits.reverse();
        }
        Ok(habits)
    }

    fn delete_habit(&mut self, id: &str) -> Result<usize, PersistenceError> {
        self.habits
            .remove(id)
            .map(|habit| habit.completions.len())
            .ok_or_else(|| PersistenceError::NotFound {
                entity: "habit",
                id: id.to_string(),
            })
    }

    fn insert_completion(&mut self, completion: &Completion) -> Result<(), PersistenceError> {
        let habit = self
            .habits
            .get_mut(&completion.habit_id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity: "habit",
                id: completion.habit_id.clone(),
            })?;

        if habit.completions.iter().any(|c| c.date == completion.date) {
            return Err(PersistenceError::QueryFailed(format!(
                "habit {} already completed on {}",
                habit.id, completion.date
            )));
        }
        habit.completions.push(completion.clone());
        Ok(())
    }

    fn delete_completion(&mut self, id: &str) -> Result<(), PersistenceError> {
        for habit in self.habits.values_mut() {
            if let Some(pos) = habit.completions.iter().position(|c| c.id == id) {
                habit.completions.remove(pos);
                return Ok(());
            }
        }
        Err(PersistenceError::NotFound {
            entity: "completion",
            id: id.to_string(),
        })
    }

    fn completion_count(&self) -> Result<usize, PersistenceError> {
        Ok(self.habits.values().map(|h| h.completions.len()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime, Utc};

    fn habit(id: &str, hour: u32, age_days: i64) -> Habit {
        Habit {
            id: id.to_string(),
            name: id.to_uppercase(),
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            notes: String::new(),
            selected_days: vec![0, 1, 2, 3, 4, 5, 6],
            created_at: Utc::now() - Duration::days(age_days),
            completions: vec![],
        }
    }

    #[test]
    fn list_orders() {
        let mut store = MemoryStore::new();
        store.insert_habit(&habit("a", 20, 3)).unwrap();
        store.insert_habit(&habit("b", 6, 1)).unwrap();
        store.insert_habit(&habit("c", 12, 2)).unwrap();

        let ids = |v: Vec<Habit>| v.into_iter().map(|h| h.id).collect::<Vec<_>>();
        assert_eq!(
            ids(store.list_habits(HabitSort::CreatedAt, SortOrder::Ascending).unwrap()),
            vec!["a", "c", "b"]
        );
        assert_eq!(
            ids(store.list_habits(HabitSort::Time, SortOrder::Descending).unwrap()),
            vec!["a", "c", "b"]
        );
    }

    #[test]
    fn cascade_and_duplicates() {
        let mut store = MemoryStore::new();
        store.insert_habit(&habit("a", 7, 0)).unwrap();
        let d = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();

        store.insert_completion(&Completion::new("a", d)).unwrap();
        assert!(store.insert_completion(&Completion::new("a", d)).is_err());
        assert!(store.insert_completion(&Completion::new("zz", d)).is_err());

        assert_eq!(store.delete_habit("a").unwrap(), 1);
        assert_eq!(store.completion_count().unwrap(), 0);
        assert!(store.delete_habit("a").is_err());
    }
}
