//! End-to-end endorsement workflow: predict the contract address, build the claim, sign it, and
//! hand the on-chain fields to the deployment transaction builder.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tesc_types::{ProviderError, Web3Provider};

use crate::{
    claim::Claim,
    errors::{CodecError, EndorseError, SignatureError},
    fingerprint::Fingerprint,
    flags::FlagSet,
    predictor::predict_next,
    signature::{self, Signature},
};

/// What the website owner filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndorsementRequest {
    /// Account that will send the deployment transaction.
    pub sender: Address,
    /// Plain domain; hashed automatically when `DOMAIN_HASHED` is set.
    pub domain: String,
    pub expiry: u64,
    pub flags: FlagSet,
    pub fingerprint: Fingerprint,
}

/// Chain state the deployment depends on, captured once per signing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentContext {
    pub sender: Address,
    pub nonce: u64,
    pub contract_address: Address,
    /// `None` when the provider does not report gas prices.
    pub gas_price: Option<u128>,
}

/// Claim, signature and the fingerprint the contract constructor takes.
///
/// The on-chain flags field is always derived from the signed claim. It is serialised as
/// `flagsHex` for the deployment transaction builder, and deserialising rejects a `flagsHex` that
/// disagrees with `claim.flags`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EndorsementFields", into = "EndorsementFields")]
pub struct Endorsement {
    pub claim: Claim,
    pub signature: Signature,
    pub fingerprint: Fingerprint,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndorsementFields {
    claim: Claim,
    signature: Signature,
    flags_hex: String,
    fingerprint: Fingerprint,
}

impl Endorsement {
    /// Sign `claim` as-is, e.g. for a contract that already exists.
    pub fn sign(
        claim: Claim,
        private_key_pem: &str,
        fingerprint: Fingerprint,
    ) -> Result<Self, SignatureError> {
        let signature = signature::sign(&claim, private_key_pem)?;
        Ok(Self {
            claim,
            signature,
            fingerprint,
        })
    }

    /// The `bytes24` flags field, exactly as it appears in the signed claim.
    pub fn flags_hex(&self) -> String {
        self.claim.flags.to_on_chain_hex()
    }

    pub fn verify(&self, public_pem: &str) -> Result<bool, SignatureError> {
        signature::verify(&self.claim, &self.signature, public_pem)
    }
}

impl TryFrom<EndorsementFields> for Endorsement {
    type Error = CodecError;

    fn try_from(fields: EndorsementFields) -> Result<Self, Self::Error> {
        let signed = fields.claim.flags.to_on_chain_hex();
        if !fields.flags_hex.eq_ignore_ascii_case(&signed) {
            return Err(CodecError::FlagsMismatch {
                field: fields.flags_hex,
                signed,
            });
        }
        Ok(Self {
            claim: fields.claim,
            signature: fields.signature,
            fingerprint: fields.fingerprint,
        })
    }
}

impl From<Endorsement> for EndorsementFields {
    fn from(endorsement: Endorsement) -> Self {
        Self {
            flags_hex: endorsement.flags_hex(),
            claim: endorsement.claim,
            signature: endorsement.signature,
            fingerprint: endorsement.fingerprint,
        }
    }
}

pub struct Endorser<P> {
    provider: P,
}

impl<P: Web3Provider> Endorser<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn prepare(&self, sender: Address) -> Result<DeploymentContext, EndorseError> {
        let (nonce, contract_address) = predict_next(&self.provider, sender)?;
        let gas_price = match self.provider.gas_price() {
            Ok(wei) => Some(wei),
            Err(ProviderError::NotImplemented) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(DeploymentContext {
            sender,
            nonce,
            contract_address,
            gas_price,
        })
    }

    /// Endorse the contract `request.sender` is about to deploy.
    ///
    /// The signature binds the address predicted from the sender's current nonce; any transaction
    /// sent from that account before the deployment invalidates it.
    pub fn endorse(
        &self,
        request: &EndorsementRequest,
        private_key_pem: &str,
    ) -> Result<(DeploymentContext, Endorsement), EndorseError> {
        let context = self.prepare(request.sender)?;
        let claim = Claim::for_endorsement(
            context.contract_address,
            &request.domain,
            request.expiry,
            request.flags,
        );
        let endorsement = Endorsement::sign(claim, private_key_pem, request.fingerprint)?;
        tracing::info!(
            contract = %context.contract_address,
            domain = %endorsement.claim.domain,
            expiry = endorsement.claim.expiry,
            "endorsement ready for deployment"
        );
        Ok((context, endorsement))
    }
}
