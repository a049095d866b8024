//! Fixed negative fixtures for rejection scenarios.
//!
//! These values have no structure worth interpreting. They are calldata no
//! honest prover produced for the circuits in the built-in suite, so a
//! correct verifier must answer `false` for them.

use zkcall_core::{FieldElement, PublicSignals};
use zkcall_zkp::{Calldata, Groth16Calldata, PlonkCalldata};

/// A 25-word PLONK proof blob unrelated to any setup in the suite.
pub const PLONK_UNRELATED_BLOB: &str = concat!(
    "0x",
    "2f8a36ec044ac2f6e0df858aa96855070ee81f7bfa0ce61cce082a0d3e095482",
    "24cd787dab59d6c4bee2fd5121eff8f9b6dd752eb30cb07f3bf7a3ffc6a42202",
    "103f1c9af02f8aec1110edcf7ca8f80edee8d1948b69e9e9b73ea6a0bea0355f",
    "16efc96d3e75e1e9f13878e308b6ea545319703b37b88ddd9c8826c7bcd645e4",
    "2d36dffa24b3d61841d139169ca38814d89d5495540df4b3b764e57060178be8",
    "1834907a6728af64b2dfc8af03cf11c2d2ed7010c32acdaa6ac02a6e4f02a8e9",
    "16fb2298dddf8bd9c27e0dbb62effe84dd61e6101e7731573830b87e36baaa14",
    "240ef64a04eaa331ae33fb01c5af0edb53decc0e9cb01a7d4ba750d01cb71daa",
    "242fca3c59f4eeeb5eff7fb32597764374862abcbfc5c24644f72b3065eeb28a",
    "0c7c62866c6754ba703d3bdffddc4fa5e3cc15a8e9395d6174fd99d18c6f1938",
    "1cb161e6ea096a8cd795a0066479ed1d626f7a696f42ce288c102c3c3d3dfe23",
    "265d53e61486a6895301cdaa7c14fc45505eb716ee4342918b1e6f0beed44d72",
    "1acd077bd645ffdb940a9f9ff74edbd03c77d3894a6d4d73b10edf01e84903de",
    "0bdf8f4fec72c836a3d5e6a0c6d4f9b5c682bc8f670ad5df99852b35c95b9c8f",
    "2c78365aafb51b045d46653d2b13eee564acdfe52561e39f1d22c7d4c600f77d",
    "2b6c15c04a2dc92a281f0713f526122dba6f148c94b732276bc28a5f774b1eaf",
    "1e9f13aa1c01619abf9b020b9c022cedcf6dfb6fb1db5e530e1b8c48fd469815",
    "01aa3261f76dd0d2a3c4b54c6d451edf1cc3571138d95aaf26a828c400c6dd6f",
    "29438ae480847aeaf4602faf2268c681467aa03a11c3b8a0ed917280be2c3257",
    "225ddc9dfe586f3f6a0e42fc5a624e0b11f32eef5b072ed53dfafaf976f19f30",
    "267048e900102d775895a5c6f5aa9124222968c44a4383c010e47cff22dd5a21",
    "1a8f033c40bfa120129650f6318c2164a93e1e2b18fd0763682f07aec21144c1",
    "0dbbb87d5fc5cbe86308d91d42d61c8b76915be83b513d14434d8fb9f71a3e67",
    "152f17bf61bf55927799db513e3eba58e8120a9d56288c749635f20b56052d23",
    "062941baed00d8168c7293f58ecfd73bd015aaafdd9eccbd2ac0832e9255a196",
);

/// Groth16 arguments with every proof word and input set to zero.
pub fn zeroed_groth16(input_len: usize) -> Calldata {
    Calldata::Groth16(Groth16Calldata::zeroed(input_len))
}

/// [`PLONK_UNRELATED_BLOB`] with the public signal vector `[0]`.
pub fn unrelated_plonk() -> Calldata {
    Calldata::Plonk(PlonkCalldata {
        proof: PLONK_UNRELATED_BLOB.to_string(),
        pub_signals: PublicSignals::new(vec![FieldElement::ZERO]),
    })
}
