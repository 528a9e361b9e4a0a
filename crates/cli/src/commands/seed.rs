//! Seed the database with random demo customers.
//!
//! Customers are registered through `CustomerService`, so the usual email
//! uniqueness rule applies. A generated email that is already taken is
//! skipped with a warning instead of aborting the run.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{info, warn};

use customer_registry_api::services::CustomerError;
use customer_registry_core::{CustomerRegistrationRequest, Email, EmailError};

use super::{CommandError, customer_service};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Dennis", "Donald", "Edsger", "Frances", "Grace", "John", "Katherine",
    "Leslie", "Margaret", "Niklaus", "Radia", "Tony",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Dijkstra", "Hamilton", "Hoare", "Hopper", "Johnson", "Knuth", "Lamport", "Liskov",
    "Lovelace", "McCarthy", "Perlman", "Shannon", "Turing", "Wirth",
];

/// Youngest generated age (inclusive).
const MIN_AGE: i32 = 18;
/// Oldest generated age (exclusive).
const MAX_AGE: i32 = 99;

/// Build one random registration: `First Last`, `first.last@example.com`.
fn random_customer(rng: &mut impl Rng) -> Result<CustomerRegistrationRequest, EmailError> {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ada");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Lovelace");

    let email = Email::parse(&format!(
        "{}.{}@example.com",
        first.to_lowercase(),
        last.to_lowercase()
    ))?;

    Ok(CustomerRegistrationRequest {
        name: format!("{first} {last}"),
        email,
        age: rng.random_range(MIN_AGE..MAX_AGE),
    })
}

/// Register `count` random customers.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a registration fails
/// for any reason other than a duplicate email.
pub async fn run(count: usize) -> Result<(), CommandError> {
    let service = customer_service().await?;

    let requests = {
        let mut rng = rand::rng();
        (0..count)
            .map(|_| random_customer(&mut rng))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut created = 0_usize;
    for request in requests {
        let email = request.email.clone();
        match service.add_customer(request).await {
            Ok(()) => {
                created += 1;
                info!(email = %email, "Seeded customer");
            }
            Err(CustomerError::DuplicateEmail) => {
                warn!(email = %email, "Skipping customer, email already taken");
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(requested = count, created, "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_random_customer_shape() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let customer = random_customer(&mut rng).unwrap();

            let (first, last) = customer.name.split_once(' ').unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));

            let (first, last) = (first.to_lowercase(), last.to_lowercase());
            let expected = format!("{first}.{last}@example.com");
            assert_eq!(customer.email.as_str(), expected);
            assert!((MIN_AGE..MAX_AGE).contains(&customer.age));
        }
    }

    #[test]
    fn test_random_customer_is_deterministic_per_seed() {
        let a = random_customer(&mut StdRng::seed_from_u64(1)).unwrap();
        let b = random_customer(&mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }
}
