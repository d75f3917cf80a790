use super::data_storage::DataStorage;
use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use std::fs;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

/// A single secret value kept AES-256-CBC encrypted and base64 encoded in a
/// file of the data directory. Key and IV are embedded at build time.
#[derive(Clone, Debug)]
pub struct Secret {
    path: PathBuf,
}

impl Secret {
    pub fn new(storage: &DataStorage, file_name: &str) -> Result<Self> {
        Ok(Self {
            path: storage.get_path(file_name)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_TOKEN_KEY, APP_METADATA_TOKEN_IV)?;
        let encoded = BASE64_STANDARD.encode(cipher.encrypt_vec(value.as_bytes()));
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    /// Returns `None` when nothing is stored. A file that does not decrypt is
    /// an error.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let encoded = fs::read_to_string(&self.path)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(APP_METADATA_TOKEN_KEY, APP_METADATA_TOKEN_IV)?;
        let plaintext = cipher.decrypt_vec(&ciphertext)?;
        Ok(Some(String::from_utf8(plaintext)?))
    }

    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
