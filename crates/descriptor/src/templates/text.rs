//! Template bodies rendered by the host framework.
//!
//! Placeholders use the host's `{{ .Node.* }}` syntax and are left untouched
//! here, except for [`NETWORK_ID_PLACEHOLDER`].

/// Placeholder substituted with the resolved network id before hand-off.
pub const NETWORK_ID_PLACEHOLDER: &str = "{{ .Node.StrParameters.networkid }}";

/// Placeholder substituted with the resolved database URL before hand-off.
pub const DB_HOST_PLACEHOLDER: &str = "{{ .Node.StrParameters.db_host }}";

/// Command file body when no role is selected.
pub const HELP_CMD: &str = "--help";

pub const COLLECTOR_ENV: &str = "SERVICE_PORT=8545
SERVICE_HOST=bpm-{{ .Node.ID }}-{{ .Node.StrParameters.subtype }}";

pub const PROXY_CMD: &str = "--verbosity=3
--networkid={{ .Node.StrParameters.networkid }}
--syncmode=full
--proxy.proxy
--proxy.proxiedvalidatoraddress={{ .Node.StrParameters.signer }}
--proxy.internalendpoint=:30503
--rpc
--rpcvhosts=bpm-{{ .Node.ID }}-{{ .Node.StrParameters.subtype }}
--rpcaddr={{ .Node.StrParameters.rpcaddr }}
--rpcapi=eth,net,web3,debug,admin,personal
--etherbase={{ .Node.StrParameters.signer }}
--bootnodes={{ .Node.StrParameters.bootnodes }}
";

pub const VALIDATOR_CMD: &str = "--verbosity=3
--networkid={{ .Node.StrParameters.networkid }}
--syncmode=full
--mine
--port={{ .Node.StrParameters.port }}
--istanbul.blockperiod=5
--istanbul.requesttimeout=3000
--etherbase={{ .Node.StrParameters.signer }}
--nodiscover
--proxy.proxied
--proxy.proxyenodeurlpair=enode://{{ .Node.StrParameters.enode }}@{{ .Node.StrParameters.proxy_internal }}:30503;enode://{{ .Node.StrParameters.enode }}@{{ .Node.StrParameters.proxy_external }}:30303
--unlock={{ .Node.StrParameters.signer }}
--rpcvhosts=bpm-{{ .Node.ID }}-{{ .Node.StrParameters.subtype }}
--password=/root/.celo/configs/.password.secret
--keystore=/root/.celo/configs/keystore
";

pub const FULLNODE_CMD: &str = r#"--verbosity=3
--networkid={{ .Node.StrParameters.networkid }}
--syncmode=full
--rpc
--rpcaddr={{ .Node.StrParameters.rpcaddr }}
--rpcapi=eth,net,web3,debug,admin,personal
--light.serve={{ .Node.StrParameters.light_serve }}
--light.maxpeers={{ .Node.StrParameters.light_maxpeers }}
--maxpeers={{ .Node.StrParameters.maxpeers }}
--port={{ .Node.StrParameters.port }}
--rpcvhosts=bpm-{{ .Node.ID }}-{{ .Node.StrParameters.subtype }}
--etherbase={{ .Node.StrParameters.account }}
--bootnodes={{ .Node.StrParameters.bootnodes }}
{{ if eq .Node.StrParameters.nousb "true" "TRUE" "True" }}--nousb{{ end }}
--verbosity=5
"#;

pub const ATTESTATION_NODE_CMD: &str = "--verbosity=3
--networkid={{ .Node.StrParameters.networkid }}
--syncmode=full
--rpc
--rpcvhosts=bpm-{{ .Node.ID }}-{{ .Node.StrParameters.subtype }}
--rpcaddr={{ .Node.StrParameters.rpcaddr }}
--rpcapi=eth,net,web3,debug,admin,personal
--allow-insecure-unlock
--unlock={{ .Node.StrParameters.signer }}
--keystore=/root/.celo/configs/keystore
--password=/root/.celo/configs/.password.secret
--bootnodes={{ .Node.StrParameters.bootnodes }}
--bootnodesv4=enode://f65013f1ac6827e275c2d2737ce13357f620d4364124d02227a19321c57f8fbf9214a9411de49d49f180b085b031d9d23211a6ead4499fc5f9d3592b55322123@50.17.60.161:30303
";

// The attestation service is configured entirely through its env file.
pub const ATTESTATION_SERVICE_CMD: &str = "";

pub const ATTESTATION_SERVICE_ENV: &str = "ATTESTATION_SIGNER_ADDRESS={{ .Node.StrParameters.signer }}
CELO_VALIDATOR_ADDRESS={{ .Node.StrParameters.validator }}
CELO_PROVIDER={{ .Node.StrParameters.node_url }}
DATABASE_URL={{ .Node.StrParameters.db_host }}
SMS_PROVIDERS=twilio
TWILIO_MESSAGING_SERVICE_SID={{ .Node.StrParameters.twilio_service_sid }}
TWILIO_ACCOUNT_SID={{ .Node.StrParameters.twilio_account_sid }}
TWILIO_BLACKLIST={{ .Node.StrParameters.twilio_blacklist }}
TWILIO_AUTH_TOKEN={{ .Node.StrParameters.twilio_auth_token }}
PORT={{ .Node.StrParameters.port }}";

pub const POSTGRES_ENV: &str = "POSTGRES_PASSWORD={{ .Node.StrParameters.db_password }}
POSTGRES_USER={{ .Node.StrParameters.db_user }}
POSTGRES_DATABASE=attestation-service";
