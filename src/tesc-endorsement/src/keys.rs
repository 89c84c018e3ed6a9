//! PEM parsing for TLS key material.
//!
//! Files uploaded by website owners vary: PKCS#8 or PKCS#1 private keys, bare public keys, full
//! certificates, or several blocks concatenated. Blocks are scanned in file order and the first
//! one with a supported label is used; blocks with other labels are skipped.

use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use x509_cert::{
    der::{DecodePem, Encode},
    Certificate,
};

use crate::errors::SignatureError;

const CERTIFICATE: &str = "CERTIFICATE";
const PRIVATE_KEY: &str = "PRIVATE KEY";
const RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";
const PUBLIC_KEY: &str = "PUBLIC KEY";
const RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";

const BEGIN: &str = "-----BEGIN ";
const DASHES: &str = "-----";

/// The first complete `-----BEGIN <label>----- ... -----END <label>-----` block whose label is
/// one of `labels`, together with that label.
fn first_block<'a>(pem: &'a str, labels: &[&'static str]) -> Option<(&'static str, &'a str)> {
    let mut cursor = 0;
    while let Some(offset) = pem[cursor..].find(BEGIN) {
        let start = cursor + offset;
        let label_start = start + BEGIN.len();
        let label_len = pem[label_start..].find(DASHES)?;
        let label = &pem[label_start..label_start + label_len];

        if let Some(&known) = labels.iter().find(|&&candidate| candidate == label) {
            let end = format!("-----END {known}-----");
            if let Some(stop) = pem[start..].find(&end) {
                return Some((known, &pem[start..start + stop + end.len()]));
            }
        }
        cursor = label_start;
    }
    None
}

pub fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, SignatureError> {
    match first_block(pem, &[PRIVATE_KEY, RSA_PRIVATE_KEY]) {
        Some((PRIVATE_KEY, block)) => {
            RsaPrivateKey::from_pkcs8_pem(block).map_err(|_| SignatureError::InvalidPrivateKey)
        }
        Some((_, block)) => {
            RsaPrivateKey::from_pkcs1_pem(block).map_err(|_| SignatureError::InvalidPrivateKey)
        }
        None => Err(SignatureError::InvalidPrivateKey),
    }
}

pub fn parse_certificate(pem: &str) -> Result<Certificate, SignatureError> {
    let (_, block) = first_block(pem, &[CERTIFICATE]).ok_or(SignatureError::InvalidPublicKey)?;
    Certificate::from_pem(block.as_bytes()).map_err(|_| SignatureError::InvalidPublicKey)
}

/// Public key from a certificate, an SPKI `PUBLIC KEY` block, or a PKCS#1 `RSA PUBLIC KEY` block.
pub fn parse_public_key(pem: &str) -> Result<RsaPublicKey, SignatureError> {
    match first_block(pem, &[CERTIFICATE, PUBLIC_KEY, RSA_PUBLIC_KEY]) {
        Some((CERTIFICATE, block)) => {
            let spki = parse_certificate(block)?
                .tbs_certificate
                .subject_public_key_info
                .to_der()
                .map_err(|_| SignatureError::InvalidPublicKey)?;
            RsaPublicKey::from_public_key_der(&spki).map_err(|_| SignatureError::InvalidPublicKey)
        }
        Some((PUBLIC_KEY, block)) => {
            RsaPublicKey::from_public_key_pem(block).map_err(|_| SignatureError::InvalidPublicKey)
        }
        Some((_, block)) => {
            RsaPublicKey::from_pkcs1_pem(block).map_err(|_| SignatureError::InvalidPublicKey)
        }
        None => Err(SignatureError::InvalidPublicKey),
    }
}
