use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use missions::db::{KeyValueStore, MemoryKv};
use missions::{KvGateway, Mission, MissionStore, PersistenceGateway, StorageError, STORAGE_KEY};
use speculate2::speculate;

/// Records every snapshot the store saves.
#[derive(Clone, Default)]
struct RecordingGateway {
    stored: Option<Vec<Mission>>,
    saves: Rc<RefCell<Vec<Vec<Mission>>>>,
}

impl PersistenceGateway for RecordingGateway {
    fn load(&self) -> Result<Vec<Mission>, StorageError> {
        self.stored.clone().ok_or_else(|| StorageError::Missing {
            key: STORAGE_KEY.to_string(),
        })
    }

    fn save(&self, missions: &[Mission]) -> Result<(), StorageError> {
        self.saves.borrow_mut().push(missions.to_vec());
        Ok(())
    }
}

/// Storage that is never reachable.
struct BrokenGateway;

impl PersistenceGateway for BrokenGateway {
    fn load(&self) -> Result<Vec<Mission>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn save(&self, _missions: &[Mission]) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}

fn tasks(store: &MissionStore) -> Vec<&str> {
    store.missions().iter().map(|m| m.task.as_str()).collect()
}

speculate! {
    before {
        let gateway = RecordingGateway::default();
        let saves = gateway.saves.clone();
        let mut store = MissionStore::initialize(gateway);
    }

    describe "initialize" {
        it "seeds the default mission when nothing is stored" {
            assert_eq!(store.len(), 1);
            assert_eq!(store.missions()[0].task, "Install this application");
            assert!(!store.missions()[0].is_completed);
            assert!(saves.borrow().is_empty());
        }

        it "keeps a stored list as-is" {
            let stored = vec![
                Mission::new(20, "Second", ""),
                Mission::new(10, "First", "details"),
            ];
            let store = MissionStore::initialize(RecordingGateway {
                stored: Some(stored.clone()),
                ..Default::default()
            });

            assert_eq!(store.missions(), stored.as_slice());
        }

        it "keeps a stored empty list empty" {
            let store = MissionStore::initialize(RecordingGateway {
                stored: Some(Vec::new()),
                ..Default::default()
            });

            assert!(store.is_empty());
        }

        it "falls back to the default when storage is unreachable" {
            let store = MissionStore::initialize(BrokenGateway);
            assert_eq!(store.missions(), Mission::defaults().as_slice());
        }

        it "falls back to the default when the stored value is not a list" {
            let kv = MemoryKv::new();
            kv.set(STORAGE_KEY, br#"{"not": "a list"}"#).unwrap();

            let store = MissionStore::initialize(KvGateway::new(kv));
            assert_eq!(store.missions(), Mission::defaults().as_slice());
        }

        it "keeps valid records stored next to a malformed one" {
            let kv = MemoryKv::new();
            kv.set(
                STORAGE_KEY,
                br#"[{"id": 2, "task": null}, {"id": 1, "task": "Buy milk", "description": "2%", "is_completed": false}]"#,
            )
            .unwrap();

            let store = MissionStore::initialize(KvGateway::new(kv));
            assert_eq!(tasks(&store), vec!["Buy milk"]);
        }

        it "falls back to the default when the stored value is not json" {
            let kv = MemoryKv::new();
            kv.set(STORAGE_KEY, b"\xff\xfe garbage").unwrap();

            let store = MissionStore::initialize(KvGateway::new(kv));
            assert_eq!(store.missions(), Mission::defaults().as_slice());
        }
    }

    describe "add" {
        it "prepends missions newest first with distinct ids" {
            for title in ["One", "Two", "Three", "Four", "Five"] {
                store.add(title, "");
            }

            assert_eq!(
                tasks(&store),
                vec!["Five", "Four", "Three", "Two", "One", "Install this application"]
            );

            let ids: HashSet<_> = store.missions().iter().map(|m| m.id).collect();
            assert_eq!(ids.len(), store.len());

            let added: Vec<_> = store.missions()[..5].iter().map(|m| m.id).collect();
            assert!(added.windows(2).all(|w| w[0] > w[1]));
        }

        it "creates incomplete missions with the given description" {
            let snapshot = store.add("Buy milk", "2%");

            assert_eq!(snapshot[0].task, "Buy milk");
            assert_eq!(snapshot[0].description, "2%");
            assert!(!snapshot[0].is_completed);
        }

        it "ignores empty and whitespace-only titles" {
            let before = store.snapshot();

            store.add("", "description");
            store.add("   \t", "");

            assert_eq!(store.snapshot(), before);
            assert!(saves.borrow().is_empty());
        }

        it "still finds free ids after the highest possible id" {
            let mut store = MissionStore::initialize(RecordingGateway {
                stored: Some(vec![Mission::new(i64::MAX, "Far future", "")]),
                ..Default::default()
            });

            let first = store.add("Buy milk", "")[0].id;
            let second = store.add("Call mom", "")[0].id;

            assert_eq!(tasks(&store), vec!["Call mom", "Buy milk", "Far future"]);
            let ids: HashSet<_> = store.missions().iter().map(|m| m.id).collect();
            assert_eq!(ids.len(), 3);
            assert_ne!(first, i64::MAX);
            assert_ne!(second, i64::MAX);
        }

        it "saves the new snapshot" {
            store.add("Buy milk", "");

            let saves = saves.borrow();
            assert_eq!(saves.len(), 1);
            assert_eq!(saves[0].as_slice(), store.missions());
        }

        it "leaves earlier snapshots untouched" {
            let before = store.snapshot();
            store.add("Buy milk", "");

            assert_eq!(before.len(), 1);
            assert_eq!(store.len(), 2);
        }
    }

    describe "toggle_complete" {
        it "is an involution" {
            let id = store.add("Buy milk", "")[0].id;

            store.toggle_complete(id);
            assert!(store.get(id).unwrap().is_completed);

            store.toggle_complete(id);
            assert!(!store.get(id).unwrap().is_completed);
            assert_eq!(saves.borrow().len(), 3);
        }

        it "ignores unknown ids" {
            let before = store.snapshot();
            store.toggle_complete(999);

            assert_eq!(store.snapshot(), before);
            assert!(saves.borrow().is_empty());
        }
    }

    describe "edit" {
        it "replaces title and description but keeps id and completion" {
            let id = store.add("Old", "old desc")[0].id;
            store.toggle_complete(id);

            store.edit(id, "New Title", "New Desc");

            let mission = store.get(id).unwrap();
            assert_eq!(mission.id, id);
            assert_eq!(mission.task, "New Title");
            assert_eq!(mission.description, "New Desc");
            assert!(mission.is_completed);
        }

        it "rejects an empty title" {
            let id = store.add("Keep me", "desc")[0].id;
            let save_count = saves.borrow().len();

            store.edit(id, "", "changed");
            store.edit(id, "  ", "changed");

            let mission = store.get(id).unwrap();
            assert_eq!(mission.task, "Keep me");
            assert_eq!(mission.description, "desc");
            assert_eq!(saves.borrow().len(), save_count);
        }

        it "keeps the mission's position" {
            let first = store.add("First", "")[0].id;
            store.add("Second", "");

            store.edit(first, "First, renamed", "");

            assert_eq!(
                tasks(&store),
                vec!["Second", "First, renamed", "Install this application"]
            );
        }
    }

    describe "delete" {
        it "removes exactly the matching mission and is idempotent" {
            let id = store.add("Buy milk", "")[0].id;
            store.add("Call mom", "");

            store.delete(id);
            assert_eq!(tasks(&store), vec!["Call mom", "Install this application"]);
            let save_count = saves.borrow().len();

            store.delete(id);
            assert_eq!(store.len(), 2);
            assert_eq!(saves.borrow().len(), save_count);
        }

        it "clears the selection when the selected mission is deleted" {
            let id = store.add("Buy milk", "")[0].id;
            store.select(Some(id));
            assert_eq!(store.selected(), Some(id));

            store.delete(id);
            assert_eq!(store.selected(), None);
        }

        it "keeps the selection when another mission is deleted" {
            let kept = store.add("Keep", "")[0].id;
            let gone = store.add("Gone", "")[0].id;
            store.select(Some(kept));

            store.delete(gone);
            assert_eq!(store.selected(), Some(kept));
        }

        it "does not reuse ids of deleted missions" {
            let id = store.add("Temporary", "")[0].id;
            store.delete(id);

            let next = store.add("Next", "")[0].id;
            assert!(next > id);
        }
    }

    describe "select" {
        it "is transient" {
            let id = store.missions()[0].id;
            store.select(Some(id));

            assert_eq!(store.selected_mission().unwrap().id, id);
            assert!(saves.borrow().is_empty());

            store.select(None);
            assert!(store.selected_mission().is_none());
        }

        it "clears the selection for unknown ids" {
            let id = store.missions()[0].id;
            store.select(Some(id));
            store.select(Some(12345));

            assert_eq!(store.selected(), None);
        }
    }

    describe "persistence failures" {
        it "keep the in-memory list authoritative" {
            let mut store = MissionStore::initialize(BrokenGateway);
            let id = store.add("Buy milk", "")[0].id;
            store.toggle_complete(id);

            assert_eq!(store.len(), 2);
            assert!(store.get(id).unwrap().is_completed);
        }

        it "survive a full storage quota" {
            let kv = MemoryKv::with_quota(64);
            let mut store = MissionStore::initialize(KvGateway::new(kv.clone()));

            store.add("A title long enough to push the list past the quota", "");

            assert_eq!(store.len(), 2);
            assert_eq!(kv.get(STORAGE_KEY).unwrap(), None);
        }
    }

    describe "walkthrough" {
        it "adds, completes and deletes" {
            let milk = store.add("Buy milk", "2%")[0].id;
            let install = store.missions()[1].id;
            assert_eq!(tasks(&store), vec!["Buy milk", "Install this application"]);

            store.toggle_complete(milk);
            assert!(store.get(milk).unwrap().is_completed);

            store.delete(install);

            assert_eq!(store.len(), 1);
            let remaining = &store.missions()[0];
            assert_eq!(remaining.task, "Buy milk");
            assert_eq!(remaining.description, "2%");
            assert!(remaining.is_completed);
            assert_eq!(store.remaining(), 0);
        }
    }
}
