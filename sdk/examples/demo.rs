//! Terminal walkthrough of the NOVA SDK transaction lifecycle.
//!
//! Generates an Ed25519 and a BLS sponsor, builds a mix of actions, estimates
//! and prices their units against genesis, signs, serializes, decodes the
//! bytes back and runs the pre-flight checks. Nothing touches the network.
//!
//! Run with:
//!   cargo run --example demo --release
//!
//! Set `RUST_LOG=nova_sdk=debug` to see the library's own events.

use std::time::Instant;

use chrono::Utc;

use nova_sdk::actions::{
    Action, AssetActors, AssetType, CreateAsset, CreateDataset, MintAssetFT, Transfer,
};
use nova_sdk::auth::AuthFactory;
use nova_sdk::codec::{Address, Id};
use nova_sdk::config::Genesis;
use nova_sdk::fees::{estimate_units, Dimension};
use nova_sdk::logging::{init_logging, LogFormat};
use nova_sdk::transaction::{generate_transaction, verify_transaction, Transaction};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    NOVA SDK  --  Transaction Lifecycle Demo                        {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}    Ed25519 + BLS12-381  |  SHA-256  |  5-dimension fees            {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!(
        "{CYAN}------------------------------------------------------------------------{RESET}"
    );
}

fn subsection(text: &str) {
    println!("{DIM}{CYAN}  >> {text}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

fn address_display(name: &str, addr: &Address, color: &str) {
    let hex = addr.to_hex();
    let prefix = &hex[..10];
    let suffix = &hex[hex.len() - 8..];
    println!("  {color}{BOLD}{name}{RESET}  {DIM}{prefix}...{suffix}{RESET}");
}

fn units_table(units: &nova_sdk::fees::Dimensions) {
    for d in Dimension::ALL {
        println!(
            "  {WHITE}{:<18}{RESET} {YELLOW}{:>10}{RESET} {DIM}units{RESET}",
            d.to_string(),
            units[d]
        );
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn demo_actions(
    owner: Address,
    recipient: Address,
) -> Result<Vec<Action>, Box<dyn std::error::Error>> {
    let token = Id::new([0x51; 32]);
    let dataset = Id::new([0x52; 32]);

    Ok(vec![
        CreateAsset::new(
            AssetType::Fungible,
            "Demo Token".into(),
            "DEMO".into(),
            9,
            "created by the SDK demo".into(),
            "https://example.org/demo".into(),
            1_000_000_000_000,
            String::new(),
            AssetActors::all(owner),
        )?
        .into(),
        MintAssetFT::new(recipient, token, 5_000)?.into(),
        Transfer::new(recipient, Id::EMPTY, 1_000, b"welcome aboard".to_vec())?.into(),
        CreateDataset::new(
            dataset,
            "City Air Quality".into(),
            "hourly PM2.5 readings".into(),
            "environment,iot".into(),
            "Creative Commons BY".into(),
            "CCBY".into(),
            "https://creativecommons.org/licenses/by/4.0/".into(),
            String::new(),
            true,
        )?
        .into(),
    ])
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("warn", LogFormat::Pretty)?;
    let demo_start = Instant::now();
    let genesis = Genesis::default();
    let chain_id = Id::new([0x01; 32]);

    banner();

    // -----------------------------------------------------------------------
    // Step 1: Keys
    // -----------------------------------------------------------------------

    section(1, "Sponsor Key Generation");
    subsection("Generating one Ed25519 and one BLS signer...");

    let t = Instant::now();
    let alice = AuthFactory::generate_ed25519();
    let bob = AuthFactory::generate_bls()?;
    timing("keygen x2", t.elapsed());

    println!();
    address_display("Alice (ed25519)", &alice.address(), BLUE);
    address_display("Bob   (bls)    ", &bob.address(), GREEN);
    success("Addresses are the scheme tag followed by SHA-256 of the public key");

    // -----------------------------------------------------------------------
    // Step 2: Estimation
    // -----------------------------------------------------------------------

    section(2, "Unit Estimation");
    let actions = demo_actions(alice.address(), bob.address())?;
    subsection(&format!(
        "Estimating {} actions: {}",
        actions.len(),
        actions.iter().map(Action::name).collect::<Vec<_>>().join(", ")
    ));

    let units = estimate_units(&genesis, &actions, &alice)?;
    units_table(&units);
    assert!(units.fits_within(&genesis.max_block_units));
    success("Units fit in a block");

    // -----------------------------------------------------------------------
    // Step 3: Sign and serialize
    // -----------------------------------------------------------------------

    section(3, "Sign and Serialize");

    let t = Instant::now();
    let (tx, max_fee) = generate_transaction(
        &genesis,
        &genesis.min_unit_price,
        chain_id,
        actions,
        &alice,
    )?;
    timing("estimate + sign", t.elapsed());

    let bytes = tx.to_bytes()?;
    info("Max fee", &max_fee.to_string());
    info("Expiry", &tx.base().timestamp().to_string());
    info("Size", &format!("{} bytes", bytes.len()));
    info("Transaction ID", &tx.id()?.to_hex());

    // -----------------------------------------------------------------------
    // Step 4: Decode and verify
    // -----------------------------------------------------------------------

    section(4, "Decode and Verify");
    subsection("Decoding the bytes as a node would...");

    let t = Instant::now();
    let received = Transaction::from_bytes(&bytes)?;
    timing("decode", t.elapsed());
    assert_eq!(received.id()?, tx.id()?);
    success("Decoded transaction has the same id");

    let t = Instant::now();
    verify_transaction(&received, Utc::now().timestamp_millis(), genesis.validity_window)?;
    timing("verify", t.elapsed());
    success("Timestamp, size and signature checks pass");

    // -----------------------------------------------------------------------
    // Step 5: BLS sponsor
    // -----------------------------------------------------------------------

    section(5, "BLS Sponsor");
    let transfer: Action = Transfer::new(alice.address(), Id::EMPTY, 250, Vec::new())?.into();

    let ed_units = estimate_units(&genesis, std::slice::from_ref(&transfer), &alice)?;
    let bls_units = estimate_units(&genesis, std::slice::from_ref(&transfer), &bob)?;
    info(
        "Bandwidth (ed25519 / bls)",
        &format!(
            "{} / {}",
            ed_units[Dimension::Bandwidth],
            bls_units[Dimension::Bandwidth]
        ),
    );
    info(
        "Compute (ed25519 / bls)",
        &format!(
            "{} / {}",
            ed_units[Dimension::Compute],
            bls_units[Dimension::Compute]
        ),
    );

    let (bls_tx, _) = generate_transaction(
        &genesis,
        &genesis.min_unit_price,
        chain_id,
        vec![transfer],
        &bob,
    )?;
    let decoded = Transaction::from_bytes(&bls_tx.to_bytes()?)?;
    verify_transaction(&decoded, Utc::now().timestamp_millis(), genesis.validity_window)?;
    success("BLS-signed transaction round-trips and verifies");

    println!();
    timing("demo total", demo_start.elapsed());
    Ok(())
}
