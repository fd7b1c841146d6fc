//! Default hierarchy the store is seeded with

use crate::tree::node::ConfigNode;

const NGINX_REGOLAR: &str = r#"server {
  listen 80;
  server_name regolar.wanglei.me;

  location / {
      proxy_set_header   X-Real-IP $remote_addr;
      proxy_set_header   Host      $http_host;
      proxy_pass         http://localhost:8081;
  }
}"#;

const NGINX_TEST: &str = r#"server {
  listen 80;
  server_name test.wanglei.me;

  location / {
      proxy_set_header   X-Real-IP $remote_addr;
      proxy_set_header   Host      $http_host;
      proxy_pass         http://localhost:8081;
  }
}"#;

const ENV_DB_NAME: &str = r#"{
  "POSTGRES_PASSWORD": "db-pass",
  "POSTGRES_USER": "db-admin",
  "POSTGRES_DB": "db-name",
  "NODE_ENV": "production",
  "RAILS_ENV": "production",
}"#;

const ENV_DDEX: &str = r#"{
  "POSTGRES_PASSWORD": "db-pass",
  "POSTGRES_USER": "db-admin",
  "POSTGRES_DB": "ddex",
  "NODE_ENV": "production",
  "RAILS_ENV": "production",
}"#;

/// Sample tree with ids "0" through "17".
pub fn default_tree() -> ConfigNode {
    ConfigNode::root()
        .with_child(
            ConfigNode::folder("1", "nginx configs")
                .with_child(
                    ConfigNode::folder("2", "sites-available")
                        .with_child(ConfigNode::file("3", "test1.conf", NGINX_REGOLAR))
                        .with_child(ConfigNode::file("4", "test2.conf", NGINX_TEST)),
                )
                .with_child(
                    ConfigNode::folder("5", "sites-enabled")
                        .with_child(ConfigNode::file("6", "test1.conf", NGINX_REGOLAR))
                        .with_child(ConfigNode::file("7", "test2.conf", NGINX_TEST)),
                )
                .with_child(ConfigNode::file("8", "nginx.conf", NGINX_REGOLAR)),
        )
        .with_child(
            ConfigNode::folder("9", "dae configs")
                .with_child(
                    ConfigNode::folder("10", "DDEX configs")
                        .with_child(ConfigNode::file("11", "test1.json", ENV_DB_NAME))
                        .with_child(ConfigNode::file("12", "test2.json", ENV_DB_NAME)),
                )
                .with_child(
                    ConfigNode::folder("13", "BFD configs")
                        .with_child(ConfigNode::file("14", "test1.json", ENV_DB_NAME))
                        .with_child(ConfigNode::file("15", "test2.json", ENV_DB_NAME)),
                )
                .with_child(ConfigNode::file("16", "daetest.json", ENV_DDEX)),
        )
        .with_child(ConfigNode::file("17", "config file 1", ENV_DDEX))
}
