extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, TryIntoVal, Vec,
};

use crate::{invariants, Error, PaymentReleased, PhasedMint, PhasedMintClient};

struct Setup {
    env: Env,
    client: PhasedMintClient<'static>,
    owner: Address,
    token: token::Client<'static>,
    sac: token::StellarAssetClient<'static>,
}

fn setup_uninitialized() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(PhasedMint, ());
    let client = PhasedMintClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac_addr = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &sac_addr.address());
    let sac = token::StellarAssetClient::new(&env, &sac_addr.address());

    Setup {
        env,
        client,
        owner,
        token,
        sac,
    }
}

/// Initialise with payees `[a, b]` holding shares `[30, 70]` — the
/// production constructor arguments.
fn setup_thirty_seventy() -> (Setup, Address, Address) {
    let s = setup_uninitialized();
    let a = Address::generate(&s.env);
    let b = Address::generate(&s.env);
    s.client.initialize(
        &s.owner,
        &s.token.address,
        &vec![&s.env, a.clone(), b.clone()],
        &vec![&s.env, 30u32, 70u32],
    );
    (s, a, b)
}

/// Put `amount` of the payment token into the contract via `fund`.
fn fund(s: &Setup, amount: i128) {
    let donor = Address::generate(&s.env);
    s.sac.mint(&donor, &amount);
    s.client.fund(&donor, &amount);
}

// ─── Construction ────────────────────────────────────────────────────

#[test]
fn construction_records_payees_and_weights() {
    let (s, a, b) = setup_thirty_seventy();

    assert_eq!(s.client.payees(), vec![&s.env, a.clone(), b.clone()]);
    assert_eq!(s.client.shares(&a), 30);
    assert_eq!(s.client.shares(&b), 70);
    assert_eq!(s.client.total_shares(), 100);
    // The owner holds no shares unless listed explicitly.
    assert_eq!(s.client.shares(&s.owner), 0);
}

#[test]
fn construction_rejects_malformed_payee_sets() {
    let s = setup_uninitialized();
    let a = Address::generate(&s.env);
    let b = Address::generate(&s.env);

    // Length mismatch.
    assert_eq!(
        s.client.try_initialize(
            &s.owner,
            &s.token.address,
            &vec![&s.env, a.clone(), b.clone()],
            &vec![&s.env, 30u32],
        ),
        Err(Ok(Error::InvalidPayees))
    );

    // Zero share weight.
    assert_eq!(
        s.client.try_initialize(
            &s.owner,
            &s.token.address,
            &vec![&s.env, a.clone(), b.clone()],
            &vec![&s.env, 30u32, 0u32],
        ),
        Err(Ok(Error::InvalidPayees))
    );

    // Duplicate payee.
    assert_eq!(
        s.client.try_initialize(
            &s.owner,
            &s.token.address,
            &vec![&s.env, a.clone(), a.clone()],
            &vec![&s.env, 30u32, 70u32],
        ),
        Err(Ok(Error::InvalidPayees))
    );
}

// ─── Release ─────────────────────────────────────────────────────────

#[test]
fn releases_shares_proportionally() {
    let (s, a, b) = setup_thirty_seventy();
    fund(&s, 100);
    assert_eq!(s.client.total_received(), 100);

    assert_eq!(s.client.release(&a), 30);
    assert_eq!(s.client.release(&b), 70);

    assert_eq!(s.token.balance(&a), 30);
    assert_eq!(s.token.balance(&b), 70);
    assert_eq!(s.token.balance(&s.client.address), 0);
    assert_eq!(s.client.released(&a), 30);
    assert_eq!(s.client.released(&b), 70);

    // A second release with no new funds has nothing due.
    assert_eq!(s.client.try_release(&a), Err(Ok(Error::NothingDue)));

    invariants::assert_release_conservation(
        &[s.client.released(&a), s.client.released(&b)],
        s.client.total_received(),
    );
}

#[test]
fn entitlements_round_down() {
    let (s, a, b) = setup_thirty_seventy();
    fund(&s, 101);

    // 30.3 and 70.7 floor to 30 and 70; the remainder stays banked until
    // more funds arrive.
    assert_eq!(s.client.release(&a), 30);
    assert_eq!(s.client.release(&b), 70);
    assert_eq!(s.token.balance(&s.client.address), 1);

    invariants::assert_entitlement_bound(s.client.released(&a), 101, 30, 100);
    invariants::assert_entitlement_bound(s.client.released(&b), 101, 70, 100);
}

#[test]
fn release_stays_correct_after_prior_withdrawals() {
    let (s, a, b) = setup_thirty_seventy();
    fund(&s, 100);
    assert_eq!(s.client.release(&a), 30);

    // New funds arrive after a withdrawal; total_received keeps counting
    // from the running sum, not the current balance.
    fund(&s, 100);
    assert_eq!(s.client.total_received(), 200);
    assert_eq!(s.client.release(&a), 30);
    assert_eq!(s.client.release(&b), 140);
    assert_eq!(s.client.released(&a), 60);
    assert_eq!(s.client.released(&b), 140);

    invariants::assert_release_conservation(
        &[s.client.released(&a), s.client.released(&b)],
        s.client.total_received(),
    );
}

#[test]
fn unknown_payee_cannot_release() {
    let (s, _a, _b) = setup_thirty_seventy();
    fund(&s, 100);
    let stranger = Address::generate(&s.env);
    assert_eq!(s.client.try_release(&stranger), Err(Ok(Error::UnknownPayee)));
}

#[test]
fn release_with_no_funds_has_nothing_due() {
    let (s, a, _b) = setup_thirty_seventy();
    assert_eq!(s.client.try_release(&a), Err(Ok(Error::NothingDue)));
}

#[test]
fn release_emits_the_released_event() {
    let (s, a, _b) = setup_thirty_seventy();
    fund(&s, 100);
    s.client.release(&a);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("no events found");
    assert_eq!(last_event.0, s.client.address);
    let expected_topics = vec![&s.env, symbol_short!("released").into_val(&s.env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PaymentReleased = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        PaymentReleased {
            payee: a.clone(),
            amount: 30,
        }
    );
}

// ─── Funding paths ───────────────────────────────────────────────────

#[test]
fn fund_rejects_non_positive_amounts() {
    let (s, _a, _b) = setup_thirty_seventy();
    let donor = Address::generate(&s.env);
    assert_eq!(s.client.try_fund(&donor, &0i128), Err(Ok(Error::PaymentMismatch)));
    assert_eq!(s.client.try_fund(&donor, &-5i128), Err(Ok(Error::PaymentMismatch)));
    assert_eq!(s.client.total_received(), 0);
}

#[test]
fn total_received_is_monotonic_across_releases() {
    let (s, a, _b) = setup_thirty_seventy();
    fund(&s, 50);
    fund(&s, 50);
    assert_eq!(s.client.total_received(), 100);

    s.client.release(&a);
    // Releases pay out of the balance; the running total never decreases.
    assert_eq!(s.client.total_received(), 100);
}

#[test]
fn mint_revenue_flows_into_the_splitter() {
    let (s, a, b) = setup_thirty_seventy();

    // Drive revenue through the purchase path instead of `fund`.
    let minter = Address::generate(&s.env);
    let price: i128 = 50;
    s.sac.mint(&minter, &(2 * price));

    let tree = allowlist_gen::AllowlistTree::from_addresses([strkey(&minter)]).unwrap();
    s.client.set_phase_params(&s.owner, &1, &price, &10);
    s.client.set_phase_merkle_root(
        &s.owner,
        &1,
        &soroban_sdk::BytesN::from_array(&s.env, &tree.root()),
    );
    s.client.set_current_phase(&s.owner, &1);

    let mut proof = Vec::new(&s.env);
    for node in tree.proof_for(&strkey(&minter)).unwrap() {
        proof.push_back(soroban_sdk::BytesN::from_array(&s.env, &node));
    }
    s.client.mint_presale(&minter, &1, &proof, &2, &(2 * price));

    assert_eq!(s.client.total_received(), 100);
    assert_eq!(s.client.release(&a), 30);
    assert_eq!(s.client.release(&b), 70);
}

/// The ASCII strkey of an address, as hashed by the allowlist generator.
fn strkey(addr: &Address) -> std::string::String {
    let s = addr.to_string();
    let mut buf = std::vec![0u8; s.len() as usize];
    s.copy_into_slice(&mut buf);
    std::string::String::from_utf8(buf).expect("strkeys are ASCII")
}
