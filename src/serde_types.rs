use std::fmt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use crate::crypto::curve::{ElectionCurve, Word};
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::nizk_vote_or::ZkProofVoteOr;
use crate::crypto::vote::EncryptedVote;
use crate::error::VotingError;

pub fn words_to_point<C: ElectionCurve>(x: &Word, y: &Word) -> Result<C::Point, VotingError> {
    C::from_coordinates(x, y).ok_or(VotingError::InvalidPoint)
}

pub fn word_to_scalar<C: ElectionCurve>(word: &Word) -> Result<C::Scalar, VotingError> {
    C::scalar_from_word(word).ok_or(VotingError::InvalidScalar)
}

/// `[Y.x, Y.y]`, the argument the election contract is deployed with.
pub fn public_key_to_words<C: ElectionCurve>(public: &C::Point) -> [Word; 2] {
    C::point_to_words(public)
}

pub fn public_key_from_words<C: ElectionCurve>(words: &[Word; 2]) -> Result<C::Point, VotingError> {
    words_to_point::<C>(&words[0], &words[1])
}

/// `[c1.x, c1.y, c2.x, c2.y]`
pub fn ciphertext_to_words<C: ElectionCurve>(ciphertext: &Ciphertext<C>) -> [Word; 4] {
    let [c1x, c1y] = C::point_to_words(&ciphertext.c1);
    let [c2x, c2y] = C::point_to_words(&ciphertext.c2);
    [c1x, c1y, c2x, c2y]
}

pub fn ciphertext_from_words<C: ElectionCurve>(words: &[Word; 4]) -> Result<Ciphertext<C>, VotingError> {
    Ok(Ciphertext::new(
        words_to_point::<C>(&words[0], &words[1])?,
        words_to_point::<C>(&words[2], &words[3])?,
    ))
}

/// Contract layout of a proof. Points come pairwise per branch, which is not the order they
/// are hashed in: `[a0.x, a0.y, b0.x, b0.y, a1.x, a1.y, b1.x, b1.y, c0, c1, f0, f1]`.
pub fn proof_to_contract_words<C: ElectionCurve>(proof: &ZkProofVoteOr<C>) -> [Word; 12] {
    let [a0x, a0y] = C::point_to_words(&proof.a0);
    let [b0x, b0y] = C::point_to_words(&proof.b0);
    let [a1x, a1y] = C::point_to_words(&proof.a1);
    let [b1x, b1y] = C::point_to_words(&proof.b1);
    [
        a0x, a0y,
        b0x, b0y,
        a1x, a1y,
        b1x, b1y,
        C::scalar_to_word(&proof.c0),
        C::scalar_to_word(&proof.c1),
        C::scalar_to_word(&proof.f0),
        C::scalar_to_word(&proof.f1),
    ]
}

pub fn proof_from_contract_words<C: ElectionCurve>(words: &[Word; 12]) -> Result<ZkProofVoteOr<C>, VotingError> {
    Ok(ZkProofVoteOr {
        a0: words_to_point::<C>(&words[0], &words[1])?,
        b0: words_to_point::<C>(&words[2], &words[3])?,
        a1: words_to_point::<C>(&words[4], &words[5])?,
        b1: words_to_point::<C>(&words[6], &words[7])?,
        c0: word_to_scalar::<C>(&words[8])?,
        c1: word_to_scalar::<C>(&words[9])?,
        f0: word_to_scalar::<C>(&words[10])?,
        f1: word_to_scalar::<C>(&words[11])?,
    })
}

/// A `uint256` serialized as a `0x`-prefixed hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexWord(pub Word);

impl fmt::Debug for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for HexWord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl<'de> Deserialize<'de> for HexWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let mut word = [0u8; 32];
        hex::decode_to_slice(digits, &mut word).map_err(de::Error::custom)?;
        Ok(HexWord(word))
    }
}

/// A vote in the form submitted to the ledger contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractVote {
    pub ciphertext: [HexWord; 4],
    pub proof: [HexWord; 12],
}

impl ContractVote {
    pub fn from_vote<C: ElectionCurve>(vote: &EncryptedVote<C>) -> Self {
        ContractVote {
            ciphertext: ciphertext_to_words(&vote.ciphertext).map(HexWord),
            proof: proof_to_contract_words(&vote.proof).map(HexWord),
        }
    }

    /// Decodes every point and scalar strictly; nothing is repaired or reduced.
    pub fn to_vote<C: ElectionCurve>(&self) -> Result<EncryptedVote<C>, VotingError> {
        let ciphertext = ciphertext_from_words::<C>(&self.ciphertext.map(|w| w.0))
            .map_err(|e| VotingError::DeserializationError(format!("ciphertext: {}", e)))?;
        let proof = proof_from_contract_words::<C>(&self.proof.map(|w| w.0))
            .map_err(|e| VotingError::DeserializationError(format!("proof: {}", e)))?;
        Ok(EncryptedVote { ciphertext, proof })
    }
}
