use crate::component::http as flow;
use crate::prometheus;

pub fn to_http_client_config(config: &prometheus::HttpClientConfig) -> flow::HttpClientConfig {
    flow::HttpClientConfig {
        basic_auth: config.basic_auth.as_ref().map(to_basic_auth),
        authorization: config.authorization.as_ref().map(to_authorization),
        oauth2: config.oauth2.as_ref().map(to_oauth2),
        bearer_token: config.bearer_token.clone(),
        bearer_token_file: config.bearer_token_file.clone(),
        proxy_url: config.proxy_url.clone(),
        tls_config: to_tls_config(&config.tls_config),
        follow_redirects: config.follow_redirects,
        enable_http2: config.enable_http2,
    }
}

fn to_basic_auth(basic_auth: &prometheus::BasicAuth) -> flow::BasicAuth {
    flow::BasicAuth {
        username: basic_auth.username.clone(),
        password: basic_auth.password.clone(),
        password_file: basic_auth.password_file.clone(),
    }
}

fn to_authorization(authorization: &prometheus::Authorization) -> flow::Authorization {
    flow::Authorization {
        kind: authorization.kind.clone(),
        credentials: authorization.credentials.clone(),
        credentials_file: authorization.credentials_file.clone(),
    }
}

fn to_oauth2(oauth2: &prometheus::OAuth2) -> flow::OAuth2Config {
    flow::OAuth2Config {
        client_id: oauth2.client_id.clone(),
        client_secret: oauth2.client_secret.clone(),
        client_secret_file: oauth2.client_secret_file.clone(),
        scopes: oauth2.scopes.clone(),
        token_url: oauth2.token_url.clone(),
        endpoint_params: oauth2.endpoint_params.clone(),
        proxy_url: oauth2.proxy_url.clone(),
        tls_config: to_tls_config(&oauth2.tls_config),
    }
}

fn to_tls_config(tls_config: &prometheus::TlsConfig) -> flow::TlsConfig {
    flow::TlsConfig {
        ca_pem: tls_config.ca.clone(),
        ca_file: tls_config.ca_file.clone(),
        cert_pem: tls_config.cert.clone(),
        cert_file: tls_config.cert_file.clone(),
        key_pem: tls_config.key.clone(),
        key_file: tls_config.key_file.clone(),
        server_name: tls_config.server_name.clone(),
        insecure_skip_verify: tls_config.insecure_skip_verify,
        min_version: tls_config.min_version.clone(),
    }
}
