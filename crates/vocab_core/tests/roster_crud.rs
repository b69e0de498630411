use vocab_core::db::open_db_in_memory;
use vocab_core::{
    NewStudent, NewTeacher, NewUnit, RepoError, RosterService, StudentPatch, TeacherPatch,
    ValidationError,
};

fn new_teacher(login: &str) -> NewTeacher {
    NewTeacher {
        login: login.to_string(),
        full_name: format!("{login} full name"),
        email: None,
    }
}

#[test]
fn create_and_get_teacher_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let created = service
        .create_teacher(&NewTeacher {
            login: "  olga ".to_string(),
            full_name: "Olga Petrova".to_string(),
            email: Some("olga@school.example".to_string()),
        })
        .unwrap();
    assert_eq!(created.login, "olga");
    assert!(created.is_active);

    let loaded = service.get_teacher(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn duplicate_login_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    service.create_teacher(&new_teacher("olga")).unwrap();
    let err = service.create_teacher(&new_teacher("olga")).unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[test]
fn blank_full_name_is_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let err = service
        .create_teacher(&NewTeacher {
            login: "olga".to_string(),
            full_name: "   ".to_string(),
            email: None,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("full_name"))
    ));
    assert!(service.list_teachers().unwrap().is_empty());
}

#[test]
fn update_teacher_applies_patch_only() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let created = service.create_teacher(&new_teacher("olga")).unwrap();

    let updated = service
        .update_teacher(
            created.id,
            &TeacherPatch {
                is_active: Some(false),
                ..TeacherPatch::default()
            },
        )
        .unwrap();
    assert!(!updated.is_active);
    assert_eq!(updated.login, "olga");
    assert_eq!(service.get_teacher(created.id).unwrap().unwrap(), updated);
}

#[test]
fn update_missing_teacher_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let err = service
        .update_teacher(42, &TeacherPatch::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "teacher",
            id: 42
        }
    ));
}

#[test]
fn students_can_be_filtered_by_teacher() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let teacher = service.create_teacher(&new_teacher("olga")).unwrap();

    let owned = service
        .create_student(&NewStudent {
            login: "ivan".to_string(),
            full_name: "Ivan".to_string(),
            teacher_id: Some(teacher.id),
        })
        .unwrap();
    service
        .create_student(&NewStudent {
            login: "maria".to_string(),
            full_name: "Maria".to_string(),
            teacher_id: None,
        })
        .unwrap();

    assert_eq!(service.list_students(None).unwrap().len(), 2);
    let filtered = service.list_students(Some(teacher.id)).unwrap();
    assert_eq!(filtered, vec![owned]);
}

#[test]
fn student_with_unknown_teacher_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let err = service
        .create_student(&NewStudent {
            login: "ivan".to_string(),
            full_name: "Ivan".to_string(),
            teacher_id: Some(7),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "teacher",
            id: 7
        }
    ));
}

#[test]
fn student_login_rename_to_taken_login_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let ivan = service
        .create_student(&NewStudent {
            login: "ivan".to_string(),
            full_name: "Ivan".to_string(),
            teacher_id: None,
        })
        .unwrap();
    service
        .create_student(&NewStudent {
            login: "maria".to_string(),
            full_name: "Maria".to_string(),
            teacher_id: None,
        })
        .unwrap();

    let err = service
        .update_student(
            ivan.id,
            &StudentPatch {
                login: Some("maria".to_string()),
                ..StudentPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}

#[test]
fn new_unit_has_no_scores_and_rename_keeps_them() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let student = service
        .create_student(&NewStudent {
            login: "ivan".to_string(),
            full_name: "Ivan".to_string(),
            teacher_id: None,
        })
        .unwrap();

    let unit = service
        .create_unit(&NewUnit {
            name: "Animals".to_string(),
            student_id: Some(student.id),
        })
        .unwrap();
    assert_eq!(unit.readability_index, None);
    assert_eq!(unit.diversity_index, None);

    conn.execute(
        "UPDATE units SET readability_index = 10.5, diversity_index = 0.5 WHERE id = ?1;",
        [unit.id],
    )
    .unwrap();

    let renamed = service.rename_unit(unit.id, " Wild animals ").unwrap();
    assert_eq!(renamed.name, "Wild animals");
    assert_eq!(renamed.readability_index, Some(10.5));
    assert_eq!(renamed.diversity_index, Some(0.5));

    assert_eq!(service.list_units(Some(student.id)).unwrap(), vec![renamed]);
    assert!(service.list_units(Some(student.id + 1)).unwrap().is_empty());
}

#[test]
fn unit_for_unknown_student_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let err = service
        .create_unit(&NewUnit {
            name: "Animals".to_string(),
            student_id: Some(3),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "student",
            id: 3
        }
    ));
}
