use crate::{config::Config, payload::to_pretty};
use serde_json::Value;
use std::{io, path::PathBuf};
use tokio::{fs, io::AsyncWriteExt};

//

/// Writes one file per message: `<dir>/<prefix><index>.<extension>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

//

impl FileSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.dir, &config.prefix, &config.extension)
    }

    pub fn path(&self, index: u64) -> PathBuf {
        let mut name = format!("{}{index}", self.prefix);
        if !self.extension.is_empty() {
            name.push('.');
            name.push_str(&self.extension);
        }
        self.dir.join(name)
    }

    /// Write `value` pretty printed to the file for `index`
    ///
    /// A file left over from an earlier session with
    /// the same index is truncated and overwritten.
    pub async fn write(&self, index: u64, value: &Value) -> io::Result<PathBuf> {
        let text = to_pretty(value).map_err(io::Error::from)?;
        let path = self.path(index);

        fs::create_dir_all(&self.dir).await?;

        // the handle is dropped (closed) on every return path
        let mut file = fs::File::create(&path).await?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "Message file written");

        Ok(path)
    }
}

//

#[cfg(test)]
mod tests {
    use super::FileSink;
    use crate::config::Config;
    use serde_json::{json, Value};
    use std::path::PathBuf;

    #[test]
    fn path_embeds_the_index() {
        let sink = FileSink::from_config(&Config::default());
        assert_eq!(sink.path(0), PathBuf::from("./debug/message-0.json"));
        assert_eq!(sink.path(17), PathBuf::from("./debug/message-17.json"));

        let bare = FileSink::new("out", "m", "");
        assert_eq!(bare.path(3), PathBuf::from("out/m3"));
    }

    #[tokio::test]
    async fn write_creates_the_dir_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileSink::new(tmp.path().join("nested").join("debug"), "message-", "json");

        let path = sink
            .write(0, &json!({ "a": 1, "text": "привет" }))
            .await
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"a\": 1,\n  \"text\": \"привет\"\n}");

        let path = sink.write(0, &json!({ "b": 2 })).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"b\": 2\n}");
    }

    #[tokio::test]
    async fn written_file_parses_back_to_the_same_value() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = FileSink::new(tmp.path(), "message-", "json");
        let value = json!({
            "groups": [{ "name": "ИС-21", "days": [1, 2, 3] }],
            "empty": {},
            "nothing": null,
        });

        let path = sink.write(5, &value).await.unwrap();
        assert!(path.ends_with("message-5.json"));

        let back: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, value);
    }

    #[tokio::test]
    async fn unwritable_dir_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let sink = FileSink::new(&blocker, "message-", "json");
        assert!(sink.write(0, &json!(1)).await.is_err());
    }
}
