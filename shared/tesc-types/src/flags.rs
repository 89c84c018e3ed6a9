use core::{fmt, str::FromStr};

/// Number of flags defined by the TeSC contract.
pub const FLAG_COUNT: usize = 7;

/// Named endorsement flags and their bit index in the on-chain flag field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Flag {
    DomainHashed = 0,
    AllowSubendorsement = 1,
    Exclusive = 2,
    Payable = 3,
    AllowSubdomain = 4,
    AllowAlternativeDomain = 5,
    TrustAfterExpiry = 6,
}

/// A raw flag index outside the defined range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid flag index {0}, expected 0..=6")]
pub struct InvalidFlagIndex(pub u8);

impl Flag {
    pub const ALL: [Flag; FLAG_COUNT] = [
        Flag::DomainHashed,
        Flag::AllowSubendorsement,
        Flag::Exclusive,
        Flag::Payable,
        Flag::AllowSubdomain,
        Flag::AllowAlternativeDomain,
        Flag::TrustAfterExpiry,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Name used by the contract ABI and the dApp forms.
    pub const fn name(self) -> &'static str {
        match self {
            Flag::DomainHashed => "DOMAIN_HASHED",
            Flag::AllowSubendorsement => "ALLOW_SUBENDORSEMENT",
            Flag::Exclusive => "EXCLUSIVE",
            Flag::Payable => "PAYABLE",
            Flag::AllowSubdomain => "ALLOW_SUBDOMAIN",
            Flag::AllowAlternativeDomain => "ALLOW_ALTERNATIVEDOMAIN",
            Flag::TrustAfterExpiry => "TRUST_AFTER_EXPIRY",
        }
    }
}

impl TryFrom<u8> for Flag {
    type Error = InvalidFlagIndex;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Flag::*;
        let flag = match value {
            0 => DomainHashed,
            1 => AllowSubendorsement,
            2 => Exclusive,
            3 => Payable,
            4 => AllowSubdomain,
            5 => AllowAlternativeDomain,
            6 => TrustAfterExpiry,
            _ => return Err(InvalidFlagIndex(value)),
        };
        Ok(flag)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown flag name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown flag `{0}`")]
pub struct UnknownFlag(pub String);

impl FromStr for Flag {
    type Err = UnknownFlag;

    /// Accepts the ABI name in any case, with `-` or `_` separators (`payable`, `allow-subdomain`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_uppercase().replace('-', "_");
        Flag::ALL
            .into_iter()
            .find(|flag| flag.name() == normalised)
            .ok_or_else(|| UnknownFlag(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_contract_order() {
        for (i, flag) in Flag::ALL.iter().enumerate() {
            assert_eq!(flag.index() as usize, i);
            assert_eq!(Flag::try_from(i as u8), Ok(*flag));
        }
        assert_eq!(Flag::try_from(7), Err(InvalidFlagIndex(7)));
    }

    #[test]
    fn parses_names_loosely() {
        assert_eq!("payable".parse::<Flag>(), Ok(Flag::Payable));
        assert_eq!("allow-subdomain".parse::<Flag>(), Ok(Flag::AllowSubdomain));
        assert_eq!("TRUST_AFTER_EXPIRY".parse::<Flag>(), Ok(Flag::TrustAfterExpiry));
        assert!("sub".parse::<Flag>().is_err());
    }
}
