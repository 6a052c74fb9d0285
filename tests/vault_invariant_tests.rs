use cointill::denomination::Denomination;
use cointill::vault::{CoinBundle, Vault};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded(id: u32, value: u32, capacity: u32, count: u32) -> Denomination {
    let mut d = Denomination::new(id, value, capacity);
    d.deposit(count);
    d
}

fn counts(vault: &Vault) -> Vec<u32> {
    vault.denominations().iter().map(|d| d.count).collect()
}

#[test]
fn test_capacity_invariant_under_random_traffic() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut vault = Vault::new(vec![
        seeded(1, 10, 20, 10),
        seeded(2, 5, 15, 5),
        seeded(3, 1, 30, 10),
    ])
    .unwrap();

    for _ in 0..5_000 {
        if rng.gen_bool(0.5) {
            let offer: CoinBundle = [10, 5, 1]
                .into_iter()
                .map(|value| (value, rng.gen_range(0..6)))
                .collect();
            // The mutating call must agree with its feasibility check.
            let feasible = vault.can_deposit(&offer);
            let before = counts(&vault);
            assert_eq!(vault.deposit(&offer), feasible);
            if !feasible {
                assert_eq!(counts(&vault), before);
            }
        } else {
            let amount = rng.gen_range(0..80);
            let feasible = vault.can_withdraw(amount);
            let before = counts(&vault);
            let dispensed = vault.withdraw(amount);
            assert_eq!(dispensed.is_some(), feasible);
            if !feasible {
                assert_eq!(counts(&vault), before);
            }
        }

        for d in vault.denominations() {
            assert!(
                d.count <= d.capacity,
                "denomination {} at {} over capacity {}",
                d.id,
                d.count,
                d.capacity
            );
        }
    }
}

#[test]
fn test_withdrawn_bundles_always_sum_to_the_amount() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut vault = Vault::new(vec![
        seeded(1, 25, 40, 20),
        seeded(2, 10, 40, 20),
        seeded(3, 5, 40, 20),
        seeded(4, 1, 200, 100),
    ])
    .unwrap();

    for _ in 0..1_000 {
        let amount = rng.gen_range(0..200);
        if let Some(dispensed) = vault.withdraw(amount) {
            assert_eq!(cointill::vault::bundle_total(&dispensed), amount);
            // Keep the vault topped up so the sweep stays interesting.
            assert!(vault.deposit(&dispensed));
        }
    }
}
