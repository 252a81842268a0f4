use alloy_primitives::U256;
use itertools::Itertools;

/// Lays out `data` for a string-returning cheatcode.
///
/// The bytes are right padded into 32 byte words, followed by one word holding the length of
/// `data`.
pub fn trimmed_return_data(data: &[u8]) -> Vec<u8> {
    let mut words = data
        .chunks(32)
        .map(|chunk| {
            // Copies the bytes into a 32 byte array
            // padding with zeros to the right if necessary
            let mut word = [0u8; 32];
            word[..chunk.len()].copy_from_slice(chunk);
            word
        })
        .collect_vec();

    // Add the length of the data to the end of the return data
    words.push(U256::from(data.len()).to_be_bytes());

    words.concat()
}

/// Reads data written by [`trimmed_return_data`].
pub fn decode_trimmed_return_data(output: &[u8]) -> Option<&[u8]> {
    if output.len() < 32 || output.len() % 32 != 0 {
        return None;
    }
    let (body, length) = output.split_at(output.len() - 32);
    let length = usize::try_from(U256::from_be_slice(length)).ok()?;
    body.get(..length)
}
