use bookstore_core::db::open_db_in_memory;
use bookstore_core::{
    Author, AuthorService, Organization, OrganizationService, Prize, PrizeService, RecordKind,
    ServiceError, SqliteAuthorRepository, SqliteOrganizationRepository, SqlitePrizeRepository,
};
use rusqlite::Connection;

fn seed_organization(conn: &Connection, name: &str) -> i64 {
    let service = OrganizationService::new(SqliteOrganizationRepository::try_new(conn).unwrap());
    service
        .create_organization(&Organization::new(name, "literary foundation"))
        .unwrap()
        .id
}

fn seed_author(conn: &mut Connection, name: &str) -> i64 {
    let service = AuthorService::new(SqliteAuthorRepository::try_new(conn).unwrap());
    service.create_author(&Author::new(name)).unwrap().id
}

#[test]
fn create_prize_with_fresh_organization() {
    let conn = open_db_in_memory().unwrap();
    let organization_id = seed_organization(&conn, "Fundación Rómulo Gallegos");
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let mut prize = Prize::new("Premio Rómulo Gallegos", organization_id);
    prize.description = Some("awarded every two years".to_string());
    prize.premiation_date = Some(-77_932_800_000);

    let created = service.create_prize(&prize).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, prize.name);
    assert_eq!(created.description, prize.description);
    assert_eq!(created.premiation_date, prize.premiation_date);
    assert_eq!(created.organization_id, Some(organization_id));
    assert_eq!(created.author_id, None);

    let loaded = service.get_prize(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_prize_without_organization_is_invalid() {
    let conn = open_db_in_memory().unwrap();
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let mut prize = Prize::new("unendowed", 1);
    prize.organization_id = None;
    let err = service.create_prize(&prize).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
}

#[test]
fn create_prize_with_unpersisted_organization_is_invalid() {
    let conn = open_db_in_memory().unwrap();
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    // Id 0 is the "never persisted" sentinel, and 4242 names no stored row.
    for bogus_id in [0, 4242] {
        let err = service
            .create_prize(&Prize::new("dangling", bogus_id))
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRelation(_)));
    }
}

#[test]
fn create_prize_with_taken_organization_is_invalid() {
    let conn = open_db_in_memory().unwrap();
    let organization_id = seed_organization(&conn, "Academia Sueca");
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    service
        .create_prize(&Prize::new("first prize", organization_id))
        .unwrap();

    let err = service
        .create_prize(&Prize::new("second prize", organization_id))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
}

#[test]
fn list_prizes_returns_exactly_the_inserted_records() {
    let conn = open_db_in_memory().unwrap();
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let mut inserted = Vec::new();
    for index in 0..3 {
        let organization_id = seed_organization(&conn, &format!("org {index}"));
        let prize = service
            .create_prize(&Prize::new(format!("prize {index}"), organization_id))
            .unwrap();
        inserted.push(prize);
    }

    let listed = service.list_prizes().unwrap();
    assert_eq!(listed.len(), inserted.len());
    for prize in &inserted {
        assert!(listed.iter().any(|item| item == prize));
    }
}

#[test]
fn update_prize_replaces_fields_and_preserves_id() {
    let conn = open_db_in_memory().unwrap();
    let organization_id = seed_organization(&conn, "Casa de las Américas");
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let created = service
        .create_prize(&Prize::new("draft prize", organization_id))
        .unwrap();

    let mut replacement = Prize::new("renamed prize", organization_id);
    replacement.description = Some("revised".to_string());
    let updated = service.update_prize(created.id, &replacement).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "renamed prize");
    assert_eq!(updated.description.as_deref(), Some("revised"));
    assert_eq!(updated.organization_id, Some(organization_id));
}

#[test]
fn update_prize_cannot_steal_another_organization() {
    let conn = open_db_in_memory().unwrap();
    let first_org = seed_organization(&conn, "first org");
    let second_org = seed_organization(&conn, "second org");
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let first = service.create_prize(&Prize::new("first", first_org)).unwrap();
    service.create_prize(&Prize::new("second", second_org)).unwrap();

    let err = service
        .update_prize(first.id, &Prize::new("first, moved", second_org))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
}

#[test]
fn operations_on_missing_prize_fail_not_found() {
    let conn = open_db_in_memory().unwrap();
    let organization_id = seed_organization(&conn, "lonely org");
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let err = service.get_prize(4242).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Prize,
            id: 4242
        }
    ));

    let err = service
        .update_prize(4242, &Prize::new("ghost", organization_id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Prize,
            ..
        }
    ));

    let err = service.delete_prize(4242).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Prize,
            ..
        }
    ));
}

#[test]
fn prize_with_author_cannot_be_deleted_until_detached() {
    let mut conn = open_db_in_memory().unwrap();
    let author_id = seed_author(&mut conn, "M. Mejía Vallejo");
    let organization_id = seed_organization(&conn, "Fundación Nadaísta");

    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());
    let prize = service
        .create_prize(&Prize::new("guarded prize", organization_id))
        .unwrap();

    let attached = service.attach_author(prize.id, author_id).unwrap();
    assert_eq!(attached.author_id, Some(author_id));
    let author = service.author(prize.id).unwrap();
    assert_eq!(author.map(|a| a.id), Some(author_id));

    let err = service.delete_prize(prize.id).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
    assert!(err.to_string().contains("author"));

    let detached = service.detach_author(prize.id).unwrap();
    assert_eq!(detached.author_id, None);
    assert!(service.author(prize.id).unwrap().is_none());

    service.delete_prize(prize.id).unwrap();
    let err = service.get_prize(prize.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Prize,
            ..
        }
    ));
}

#[test]
fn attach_author_requires_existing_author() {
    let conn = open_db_in_memory().unwrap();
    let organization_id = seed_organization(&conn, "strict org");
    let service = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());

    let prize = service
        .create_prize(&Prize::new("prize", organization_id))
        .unwrap();

    let err = service.attach_author(prize.id, 4242).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Author,
            id: 4242
        }
    ));
}

#[test]
fn organization_endowing_a_prize_cannot_be_deleted() {
    let conn = open_db_in_memory().unwrap();
    let organizations =
        OrganizationService::new(SqliteOrganizationRepository::try_new(&conn).unwrap());
    let organization = organizations
        .create_organization(&Organization::new("endowing org", "holds one prize"))
        .unwrap();

    let prizes = PrizeService::new(SqlitePrizeRepository::try_new(&conn).unwrap());
    let prize = prizes
        .create_prize(&Prize::new("endowed prize", organization.id))
        .unwrap();

    let endowed = organizations.prize(organization.id).unwrap();
    assert_eq!(endowed.map(|p| p.id), Some(prize.id));

    let err = organizations.delete_organization(organization.id).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));

    prizes.delete_prize(prize.id).unwrap();
    organizations.delete_organization(organization.id).unwrap();
    let err = organizations.get_organization(organization.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Organization,
            ..
        }
    ));
}
