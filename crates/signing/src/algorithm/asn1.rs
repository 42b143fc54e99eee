// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ASN.1 DER form of SM2 signatures: `SEQUENCE { r INTEGER, s INTEGER }`.

use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};

/// Width of each scalar in the raw `r || s` form.
const SCALAR_LEN: usize = 32;

#[derive(Sequence)]
struct SignatureDer<'a> {
	r: UintRef<'a>,
	s: UintRef<'a>,
}

/// Encode raw `r || s` scalars as a DER sequence.
pub(crate) fn encode(raw: &[u8; 2 * SCALAR_LEN]) -> der::Result<Vec<u8>> {
	SignatureDer {
		r: UintRef::new(&raw[..SCALAR_LEN])?,
		s: UintRef::new(&raw[SCALAR_LEN..])?,
	}
	.to_der()
}

/// Decode a DER sequence into raw `r || s`.
///
/// `None` unless the input is exactly one strictly encoded sequence of two
/// non-negative integers that each fit in a scalar.
pub(crate) fn decode(bytes: &[u8]) -> Option<[u8; 2 * SCALAR_LEN]> {
	let signature = SignatureDer::from_der(bytes).ok()?;

	let mut raw = [0u8; 2 * SCALAR_LEN];
	right_align(signature.r.as_bytes(), &mut raw[..SCALAR_LEN])?;
	right_align(signature.s.as_bytes(), &mut raw[SCALAR_LEN..])?;
	Some(raw)
}

fn right_align(digits: &[u8], out: &mut [u8]) -> Option<()> {
	let offset = out.len().checked_sub(digits.len())?;
	out[offset..].copy_from_slice(digits);
	Some(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw(r_first: u8, s_first: u8) -> [u8; 64] {
		let mut raw = [0x11u8; 64];
		raw[0] = r_first;
		raw[32] = s_first;
		raw
	}

	#[test]
	fn test_high_bit_gets_padding() {
		let der = encode(&raw(0x80, 0x01)).unwrap();
		// r: 0x02 0x21 0x00 ..., s: 0x02 0x20 ...
		assert_eq!(der[0], 0x30);
		assert_eq!(&der[2..5], &[0x02, 33, 0x00]);
		assert_eq!(decode(&der), Some(raw(0x80, 0x01)));
	}

	#[test]
	fn test_leading_zeros_are_trimmed() {
		let mut input = raw(0x00, 0x7f);
		input[1] = 0x00;
		input[2] = 0x05;
		let der = encode(&input).unwrap();
		assert_eq!(&der[2..5], &[0x02, 30, 0x05]);
		assert_eq!(decode(&der), Some(input));
	}

	#[test]
	fn test_rejects_trailing_bytes_and_wrong_tags() {
		let mut der = encode(&raw(0x01, 0x01)).unwrap();
		der.push(0);
		assert!(decode(&der).is_none());
		assert!(decode(&[0x31, 0x00]).is_none());
		assert!(decode(&[]).is_none());
	}

	#[test]
	fn test_rejects_non_minimal_and_negative_integers() {
		// r = 0x0001 carries a redundant leading zero
		assert!(decode(&[0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x01]).is_none());
		// r = 0x80 without padding is negative
		assert!(decode(&[0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01]).is_none());
		// the minimal form of the same values decodes
		assert!(decode(&[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01]).is_some());
	}

	#[test]
	fn test_rejects_oversized_scalar() {
		let mut der = vec![0x30, 0x26, 0x02, 0x21];
		der.extend_from_slice(&[0x01; 33]);
		der.extend_from_slice(&[0x02, 0x01, 0x01]);
		assert!(decode(&der).is_none());
	}
}
