//! File attachments and multipart bodies.

use std::fmt;
use std::io;
use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::error::{ClientError, Result};

/// A file chosen for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Content type is guessed from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self { file_name, content_type, bytes: bytes.into() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_owned();
        Ok(Self::new(file_name, std::fs::read(path)?))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_part(self) -> Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(ClientError::Http)
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Multipart body builder.
///
/// Only fields that are actually set end up in the request: there is no way to
/// add an empty placeholder file part.
#[derive(Default)]
pub struct FormBody {
    form: Form,
    fields: Vec<String>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push(name.to_owned());
        self.form = self.form.text(name.to_owned(), value.into());
        self
    }

    /// Adds the field only when `value` is present and not blank.
    pub fn opt_text(self, name: &str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.text(name, v.to_owned()),
            None => self,
        }
    }

    /// Adds a file part. Empty uploads are skipped.
    pub fn file(mut self, name: &str, upload: Upload) -> Result<Self> {
        if upload.is_empty() {
            return Ok(self);
        }
        self.fields.push(name.to_owned());
        self.form = self.form.part(name.to_owned(), upload.into_part()?);
        Ok(self)
    }

    pub fn opt_file(self, name: &str, upload: Option<Upload>) -> Result<Self> {
        match upload {
            Some(u) => self.file(name, u),
            None => Ok(self),
        }
    }

    /// Names of the parts added so far, in order.
    pub fn field_names(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn into_form(self) -> Form {
        self.form
    }
}

impl fmt::Debug for FormBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBody").field("fields", &self.fields).finish()
    }
}
