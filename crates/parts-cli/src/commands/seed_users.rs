use anyhow::{Context, bail};
use parts_db::service::PartsService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SeedUsersArgs;
use crate::context::AppContext;
use crate::output::output;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amara", "Anders", "Ania", "Arjun", "Aya", "Beatriz", "Bjorn",
    "Carla", "Chen", "Chidi", "Clara", "Dalia", "Daniel", "Dmitri", "Elena", "Emeka", "Erik",
    "Farah", "Felix", "Fiona", "Goran", "Grace", "Hana", "Hugo", "Ines", "Ivan", "Jamal",
    "Jana", "Jonas", "Kai", "Kamala", "Kenji", "Lara", "Leon", "Lucia", "Mads", "Maria",
    "Mateo", "Mei", "Nadia", "Nikolai", "Noor", "Olga", "Omar", "Paula", "Pedro", "Priya",
    "Quinn", "Rafael", "Rosa", "Sami", "Sofia", "Tariq", "Tomas", "Uma", "Victor", "Wen",
    "Ximena", "Yusuf", "Zara", "Zoltan",
];

const LAST_NAMES: &[&str] = &[
    "Abe", "Adeyemi", "Alvarez", "Andersen", "Bauer", "Becker", "Bianchi", "Castro", "Chowdhury",
    "Costa", "Dubois", "Eriksen", "Fischer", "Fontaine", "Garcia", "Gupta", "Haddad", "Hansen",
    "Horvat", "Ibrahim", "Ito", "Jansen", "Kaur", "Keller", "Kim", "Kowalski", "Larsen", "Lopez",
    "Mahlaba", "Martin", "Meyer", "Moreau", "Nakamura", "Nguyen", "Novak", "Okafor", "Olsen",
    "Park", "Petrov", "Popescu", "Quispe", "Rahman", "Reyes", "Rossi", "Sato", "Schmidt",
    "Silva", "Singh", "Sorensen", "Tanaka", "Torres", "Ueda", "Vargas", "Virtanen", "Wagner",
    "Walsh", "Weber", "Xu", "Yamamoto", "Yilmaz", "Zhang", "Zielinski", "Zubiri", "Zwick",
];

/// Give up on a user after this many generated names collide.
const MAX_ATTEMPTS_PER_USER: u32 = 1_000;

#[derive(Debug, Serialize)]
struct SeedUsersResponse {
    before: u32,
    created: u32,
    total: u32,
}

/// Handle `parts seed-users`.
pub async fn handle(
    args: &SeedUsersArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let target = args.count.unwrap_or(ctx.config.general.seed_user_count);
    let response = seed(&ctx.service, target, random_name).await?;
    output(&response, flags.format)
}

/// A random `(first, last)` pair drawn from the name tables.
fn random_name() -> anyhow::Result<(&'static str, &'static str)> {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes).map_err(|e| anyhow::anyhow!("system randomness unavailable: {e}"))?;
    let first = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    let last = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    Ok((
        FIRST_NAMES[first % FIRST_NAMES.len()],
        LAST_NAMES[last % LAST_NAMES.len()],
    ))
}

/// Create users until the table holds `target`. A name that is already taken
/// is skipped and another one drawn.
async fn seed(
    service: &PartsService,
    target: u32,
    mut next_name: impl FnMut() -> anyhow::Result<(&'static str, &'static str)>,
) -> anyhow::Result<SeedUsersResponse> {
    let before = service.count_users().await.context("failed to count users")?;
    let mut created = 0;

    for _ in before..target {
        let mut attempts = 0;
        loop {
            attempts += 1;
            if attempts > MAX_ATTEMPTS_PER_USER {
                bail!("no free user name after {MAX_ATTEMPTS_PER_USER} attempts ({created} created)");
            }

            let (first, last) = next_name()?;
            let username = format!("{first} {last}");
            let email = format!("{first}.{last}@example.com");
            match service.create_user(&username, &email, first, last).await {
                Ok(user) => {
                    tracing::debug!(id = user.id, username, "user seeded");
                    created += 1;
                    break;
                }
                Err(error) if error.is_duplicate() => {
                    tracing::trace!(username, "name taken, drawing another");
                }
                Err(error) => return Err(error).context("failed to create user"),
            }
        }
    }

    Ok(SeedUsersResponse {
        before,
        created,
        total: before + created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(
        names: Vec<(&'static str, &'static str)>,
    ) -> impl FnMut() -> anyhow::Result<(&'static str, &'static str)> {
        let mut names = names.into_iter();
        move || names.next().context("script exhausted")
    }

    #[tokio::test]
    async fn duplicates_are_skipped_and_redrawn() {
        let svc = PartsService::new_local(":memory:").await.unwrap();
        let names = scripted(vec![
            ("Ada", "Abe"),
            ("Ada", "Abe"),
            ("Ada", "Abe"),
            ("Alan", "Kim"),
        ]);

        let response = seed(&svc, 2, names).await.unwrap();
        assert_eq!((response.before, response.created, response.total), (0, 2, 2));

        let usernames: Vec<_> = svc
            .list_users(10)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(usernames, vec!["Ada Abe", "Alan Kim"]);
        let kim = svc.find_user_by_username("Alan Kim").await.unwrap().unwrap();
        assert_eq!(kim.email, "Alan.Kim@example.com");
    }

    #[tokio::test]
    async fn tops_up_to_target_only() {
        let svc = PartsService::new_local(":memory:").await.unwrap();
        svc.create_user("existing", "", "", "").await.unwrap();

        let response = seed(&svc, 3, random_name).await.unwrap();
        assert_eq!(response.before, 1);
        assert_eq!(response.created, 2);
        assert_eq!(svc.count_users().await.unwrap(), 3);

        let again = seed(&svc, 2, random_name).await.unwrap();
        assert_eq!(again.created, 0);
        assert_eq!(again.total, 3);
    }

    #[test]
    fn random_names_come_from_tables() {
        for _ in 0..32 {
            let (first, last) = random_name().unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }
}
