pub(crate) mod fixtures {
    //! Self-signed `example.com` certificate and keys generated with OpenSSL.

    pub const CERT: &str = include_str!("../tests/fixtures/example.com.cert.pem");
    pub const KEY_PKCS8: &str = include_str!("../tests/fixtures/example.com.key.pem");
    pub const KEY_PKCS1: &str = include_str!("../tests/fixtures/example.com.pkcs1.key.pem");
    pub const PUBLIC_KEY: &str = include_str!("../tests/fixtures/example.com.pub.pem");
    pub const OTHER_KEY: &str = include_str!("../tests/fixtures/other.key.pem");

    /// `openssl dgst -sha256 -sign example.com.key.pem` over the claim
    /// `0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed.example.com.1924819200.0x00..0011`.
    pub const CLAIM_SIGNATURE: &str = include_str!("../tests/fixtures/example.com.claim.sig");

    /// `openssl x509 -outform DER | sha256sum`
    pub const CERT_SHA256: &str =
        "0xb2a396d4c07e0ce01dee6a3a5a4b0cbcc569963809157efca00c24a5ddf27dba";
}

use alloy_primitives::{address, Address};

use crate::{
    address::validate,
    claim::Claim,
    endorser::{Endorsement, EndorsementRequest, Endorser},
    errors::{CodecError, EndorseError},
    fingerprint::Fingerprint,
    flags::FlagSet,
    predictor::predict,
    provider::StaticProvider,
    utils::domain::hash_domain,
    Flag, ProviderError,
};

const SENDER: Address = address!("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");

fn request(flags: FlagSet) -> EndorsementRequest {
    EndorsementRequest {
        sender: SENDER,
        domain: "example.com".into(),
        expiry: 1_924_819_200,
        flags,
        fingerprint: Fingerprint::of_certificate_pem(fixtures::CERT).unwrap(),
    }
}

#[test]
fn test_payable_claim_scenario() {
    // written as `0xAaAa..Aa` by hand, which is not its EIP-55 form
    let contract = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    let flags = FlagSet::new()
        .with(Flag::DomainHashed, false)
        .with(Flag::Payable, true);
    let claim = Claim::for_endorsement(contract, "example.com", 1_924_819_200, flags);

    let formatted = claim.format();
    assert_eq!(
        formatted,
        format!(
            "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa.example.com.1924819200.0x{}11",
            "0".repeat(46)
        )
    );
    assert!(validate("0xAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAaAa").is_err());

    let flags_hex = formatted.rsplit('.').next().unwrap();
    assert_eq!(flags_hex.len(), 50);
    let decoded = FlagSet::from_on_chain_hex(flags_hex).unwrap();
    assert_eq!(decoded, flags);
    for flag in Flag::ALL {
        assert_eq!(decoded.has(flag), flag == Flag::Payable, "{flag}");
    }
}

#[test]
fn test_endorse_then_verify() {
    let provider = StaticProvider::new().with_nonce(SENDER, 3).with_gas_price(1_000_000_000);
    let endorser = Endorser::new(provider);

    let (context, endorsement) = endorser
        .endorse(&request(FlagSet::new().with(Flag::Exclusive, true)), fixtures::KEY_PKCS8)
        .unwrap();

    assert_eq!(context.nonce, 3);
    assert_eq!(context.gas_price, Some(1_000_000_000));
    assert_eq!(context.contract_address, predict(SENDER, 3));
    assert_eq!(endorsement.claim.contract_address, context.contract_address);
    assert_eq!(endorsement.flags_hex(), endorsement.claim.flags.to_on_chain_hex());
    assert_eq!(endorsement.fingerprint.to_string(), fixtures::CERT_SHA256);

    assert!(endorsement.verify(fixtures::CERT).unwrap());

    // a verifier rebuilding the claim from on-chain fields reaches the same verdict
    let onchain = Claim::new(
        validate(&endorsement.claim.contract_address.to_checksum(None)).unwrap(),
        endorsement.claim.domain.clone(),
        endorsement.claim.expiry,
        FlagSet::from_on_chain_hex(&endorsement.flags_hex()).unwrap(),
    );
    assert!(crate::signature::verify(&onchain, &endorsement.signature, fixtures::CERT).unwrap());
}

#[test]
fn test_resigning_replaces_the_signature() {
    let claim = Claim::new(predict(SENDER, 0), "example.com", 1_924_819_200, FlagSet::new());
    let first = Endorsement::sign(claim.clone(), fixtures::KEY_PKCS8, Fingerprint::ABSENT).unwrap();

    let mut extended = claim;
    extended.expiry += 86_400;
    let second = Endorsement::sign(extended, fixtures::KEY_PKCS8, Fingerprint::ABSENT).unwrap();

    assert_ne!(first.signature, second.signature);
    assert!(second.verify(fixtures::CERT).unwrap());
    assert!(!crate::signature::verify(&second.claim, &first.signature, fixtures::CERT).unwrap());
}

#[test]
fn test_hashed_domain_endorsement() {
    let endorser = Endorser::new(StaticProvider::new());
    let (_, endorsement) = endorser
        .endorse(&request(FlagSet::new().with(Flag::DomainHashed, true)), fixtures::KEY_PKCS1)
        .unwrap();

    assert_eq!(endorsement.claim.domain, hash_domain("example.com"));
    assert!(endorsement.verify(fixtures::PUBLIC_KEY).unwrap());
}

#[test]
fn test_prepare_without_gas_price() {
    let endorser = Endorser::new(StaticProvider::new());
    let context = endorser.prepare(SENDER).unwrap();
    assert_eq!(context.nonce, 0);
    assert_eq!(context.gas_price, None);
    assert_eq!(context.contract_address, address!("cd234a471b72ba2f1ccf0a70fcaba648a5eecd8d"));
}

#[test]
fn test_provider_failure_is_passed_through() {
    let endorser = Endorser::new(StaticProvider::new().failing("timeout"));
    let err = endorser
        .endorse(&request(FlagSet::new()), fixtures::KEY_PKCS8)
        .unwrap_err();
    assert!(matches!(
        err,
        EndorseError::Provider(ProviderError::CallFailed(ref message)) if message == "timeout"
    ));
}

#[test]
fn test_bad_key_surfaces_signature_error() {
    let endorser = Endorser::new(StaticProvider::new());
    let err = endorser.endorse(&request(FlagSet::new()), "garbage").unwrap_err();
    assert!(matches!(
        err,
        EndorseError::Signature(crate::SignatureError::InvalidPrivateKey)
    ));
}

#[test]
fn test_endorsement_json_uses_on_chain_encodings() {
    let claim = Claim::new(
        address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
        "example.com",
        1_924_819_200,
        FlagSet::new().with(Flag::Payable, true),
    );
    let endorsement = Endorsement::sign(claim, fixtures::KEY_PKCS8, Fingerprint::ABSENT).unwrap();

    let json = serde_json::to_value(&endorsement).unwrap();
    assert_eq!(json["signature"], fixtures::CLAIM_SIGNATURE.trim());
    assert_eq!(json["flagsHex"], format!("0x{}11", "0".repeat(46)));
    assert_eq!(json["claim"]["flags"], json["flagsHex"]);
    assert_eq!(json["claim"]["expiry"], 1_924_819_200u64);

    let back: Endorsement = serde_json::from_value(json).unwrap();
    assert_eq!(back, endorsement);
}

#[test]
fn test_endorsement_json_rejects_foreign_flags_field() {
    let claim = Claim::new(
        predict(SENDER, 0),
        "example.com",
        1_924_819_200,
        FlagSet::new().with(Flag::Payable, true),
    );
    let endorsement = Endorsement::sign(claim, fixtures::KEY_PKCS8, Fingerprint::ABSENT).unwrap();

    let mut json = serde_json::to_value(&endorsement).unwrap();
    let untouched_json = json.clone();
    let swapped = FlagSet::new().with(Flag::TrustAfterExpiry, true).to_on_chain_hex();
    json["flagsHex"] = swapped.clone().into();

    let untouched: Endorsement = serde_json::from_value(untouched_json).unwrap();
    assert_eq!(untouched, endorsement);

    let err = serde_json::from_value::<Endorsement>(json).unwrap_err();
    let expected = CodecError::FlagsMismatch {
        field: swapped,
        signed: endorsement.flags_hex(),
    };
    assert_eq!(err.to_string(), expected.to_string());
}
