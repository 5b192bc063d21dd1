#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::editor::Editor;
    use crate::settings::EditorSettings;

    /// Trimmed stock Ubuntu `sshd_config`.
    pub const SSHD_CONFIG: &str = "\
# This is the sshd server system-wide configuration file.  See
# sshd_config(5) for more information.

Include /etc/ssh/sshd_config.d/*.conf

#Port 22
#AddressFamily any
#ListenAddress 0.0.0.0

#PermitRootLogin prohibit-password
#StrictModes yes

#PubkeyAuthentication yes

# To disable tunneled clear text passwords, change to no here!
#PasswordAuthentication yes
#PermitEmptyPasswords no

KbdInteractiveAuthentication no
UsePAM yes

X11Forwarding yes
PrintMotd no

Subsystem\tsftp\t/usr/lib/openssh/sftp-server
";

    /// Trimmed stock `/etc/default/ufw`.
    pub const UFW_DEFAULTS: &str = "\
# /etc/default/ufw
#

# Set to yes to apply rules to support IPv6 (no means only IPv6 on loopback
# accepted).
IPV6=yes

# Set the default input policy to ACCEPT, DROP, or REJECT.
DEFAULT_INPUT_POLICY=\"DROP\"

# Set the default output policy to ACCEPT, DROP, or REJECT.
DEFAULT_OUTPUT_POLICY=\"ACCEPT\"

# Set the default forward policy to ACCEPT, DROP or REJECT.
DEFAULT_FORWARD_POLICY=\"DROP\"
";

    /// Trimmed stock `nginx.conf` without a `keepalive_timeout`.
    pub const NGINX_CONF: &str = "\
user www-data;
worker_processes auto;
pid /run/nginx.pid;
include /etc/nginx/modules-enabled/*.conf;

events {
\tworker_connections 768;
\t# multi_accept on;
}

http {
\tsendfile on;
\ttcp_nopush on;

\tinclude /etc/nginx/mime.types;
\tdefault_type application/octet-stream;

\tgzip on;

\t# gzip_vary on;
\t# gzip_proxied any;

\tinclude /etc/nginx/conf.d/*.conf;
}
";

    /// An editor whose schema targets live in a temp directory.
    pub struct Sandbox {
        pub dir: TempDir,
        pub editor: Editor,
    }

    impl Sandbox {
        /// Write `files` as `(schema id, content)` pairs and point the editor
        /// at them.
        pub fn new(files: &[(&str, &str)]) -> Self {
            Self::with_settings(files, |_| {})
        }

        pub fn with_settings(
            files: &[(&str, &str)],
            tweak: impl FnOnce(&mut EditorSettings),
        ) -> Self {
            let dir = TempDir::new().unwrap();
            let mut paths = HashMap::new();
            for (id, content) in files {
                let path = dir.path().join(id);
                std::fs::write(&path, content).unwrap();
                paths.insert(id.to_string(), path);
            }
            let mut settings = EditorSettings {
                lock_writes: true,
                paths: Some(paths),
                syntax_check: None,
            };
            tweak(&mut settings);
            let editor = Editor::from_settings(settings).unwrap();
            Self { dir, editor }
        }

        pub fn path(&self, id: &str) -> PathBuf {
            self.dir.path().join(id)
        }

        pub fn read(&self, id: &str) -> String {
            std::fs::read_to_string(self.path(id)).unwrap()
        }
    }
}
