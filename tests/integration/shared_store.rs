use configtree::tree::NodeKind;
use configtree::{ConfigAction, ConfigForm, SharedConfigTreeStore, TreeError};
use std::thread;

#[test]
fn readers_keep_snapshots_while_writer_dispatches() {
    let store = SharedConfigTreeStore::default();
    let before = store.snapshot();

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..20 {
                store.dispatch(&ConfigAction::Create {
                    config: ConfigForm::new(format!("w{}", i), NodeKind::File, "w")
                        .under(["1", "5"]),
                });
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    let snapshot = store.snapshot();
                    assert!(snapshot.contains("6"));
                    assert_eq!(snapshot.root().id, "0");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(before.len(), 18);
    assert_eq!(store.snapshot().len(), 38);
    assert_eq!(store.version(), 20);
}

#[test]
fn checked_dispatch_reports_and_preserves_state() {
    let store = SharedConfigTreeStore::default();
    let err = store
        .try_dispatch(&ConfigAction::Update {
            config: ConfigForm::new("99", NodeKind::File, "x").under(["9"]),
        })
        .unwrap_err();
    assert_eq!(err, TreeError::NotFound { id: "99".into() });
    assert_eq!(store.version(), 0);
    assert_eq!(store.snapshot().len(), 18);
}
