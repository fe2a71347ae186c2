//! rpc::methods
//!
//! The daemon methods exposed as console commands.
//!
//! Each entry lists the argument counts the console accepts and the kind of
//! every positional parameter. Trailing optional parameters the operator
//! leaves out are not sent, so the daemon applies its own defaults.

use serde_json::Value;

use crate::core::convert::{ConversionError, ParamKind};
use crate::core::registry::Arity;

use ParamKind::{Bool, BoolAsInt, Float, Int, Json, Str};

/// One daemon method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcMethod {
    pub name: &'static str,
    /// Accepted argument counts.
    pub arities: &'static [usize],
    /// Kind of each positional parameter, in order.
    pub params: &'static [ParamKind],
    pub usage: Option<&'static str>,
}

const fn method(
    name: &'static str,
    arities: &'static [usize],
    params: &'static [ParamKind],
) -> RpcMethod {
    RpcMethod {
        name,
        arities,
        params,
        usage: None,
    }
}

impl RpcMethod {
    pub fn arity(&self) -> Arity {
        Arity::fixed(self.arities)
    }

    /// Convert operator tokens into JSON parameters.
    ///
    /// Tokens past the declared parameter list are sent as strings.
    pub fn build_params(&self, args: &[String]) -> Result<Vec<Value>, ConversionError> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| self.params.get(i).copied().unwrap_or(Str).convert(arg))
            .collect()
    }
}

/// Daemon methods with console-side handling beyond plain forwarding.
pub const GETBLOCKCHAININFO: &str = "getblockchaininfo";

/// Keys hidden from `getblockchaininfo` unless verbose output is asked for.
pub const NON_VERBOSE_EXCLUDES: &[&str] = &["softforks", "bip9_softforks"];

/// Every supported method.
pub const METHODS: &[RpcMethod] = &[
    // blockchain
    method("getinfo", &[0], &[]),
    RpcMethod {
        name: GETBLOCKCHAININFO,
        arities: &[0, 1],
        // verbose is consumed by the console, not sent
        params: &[],
        usage: Some("[verbose=False]"),
    },
    method("getblockcount", &[0], &[]),
    method("getbestblockhash", &[0], &[]),
    method("getblock", &[1, 2], &[Str, Bool]),
    method("getblockheader", &[1, 2], &[Str, Bool]),
    method("getdifficulty", &[0], &[]),
    method("getmempoolinfo", &[0], &[]),
    method("getrawmempool", &[0, 1], &[Bool]),
    method("gettxout", &[2, 3], &[Str, Int, Bool]),
    method("ping", &[0], &[]),
    method("gettxoutproof", &[1, 2], &[Json, Str]),
    method("getchaintips", &[0], &[]),
    method("getblockhash", &[1], &[Int]),
    method("getpeerinfo", &[0], &[]),
    method("getrawtransaction", &[1, 2], &[Str, BoolAsInt]),
    method("createrawtransaction", &[2], &[Json, Json]),
    method("gettxoutsetinfo", &[0], &[]),
    method("verifychain", &[0, 1, 2], &[Int, Int]),
    method("verifytxoutproof", &[1], &[Str]),
    method("stop", &[0], &[]),
    // mining
    method("generate", &[1], &[Int]),
    method("getgenerate", &[0], &[]),
    method("setgenerate", &[1, 2], &[Bool, Int]),
    method("getblocktemplate", &[0, 1], &[Json]),
    method("getmininginfo", &[0], &[]),
    method("getnetworkhashps", &[0, 1, 2], &[Int, Int]),
    method("prioritisetransaction", &[3], &[Str, Int, Int]),
    method("submitblock", &[1, 2], &[Str, Json]),
    // network
    method("addnode", &[2], &[Str, Str]),
    method("clearbanned", &[0], &[]),
    method("disconnectnode", &[1], &[Str]),
    method("getaddednodeinfo", &[1, 2], &[Bool, Str]),
    method("getconnectioncount", &[0], &[]),
    method("getnettotals", &[0], &[]),
    method("getnetworkinfo", &[0], &[]),
    method("listbanned", &[0], &[]),
    method("setban", &[2, 3, 4], &[Str, Str, Int, Bool]),
    // raw transactions
    method("signrawtransaction", &[1, 2, 3, 4], &[Str, Json, Json, Str]),
    method("decoderawtransaction", &[1], &[Str]),
    method("decodescript", &[1], &[Str]),
    method("fundrawtransaction", &[2], &[Str, Bool]),
    method("sendrawtransaction", &[1, 2], &[Str, Bool]),
    // util
    method("createmultisig", &[2], &[Int, Json]),
    method("estimatefee", &[1], &[Int]),
    method("estimatepriority", &[1], &[Int]),
    method("estimatesmartfee", &[1], &[Int]),
    method("estimatesmartpriority", &[1], &[Int]),
    method("validateaddress", &[1], &[Str]),
    method("verifymessage", &[3], &[Str, Str, Str]),
    // wallet
    method("abandontransaction", &[1], &[Str]),
    method("addmultisigaddress", &[2, 3], &[Int, Json, Str]),
    method("backupwallet", &[1], &[Str]),
    method("dumpprivkey", &[1], &[Str]),
    method("dumpwallet", &[1], &[Str]),
    method("encryptwallet", &[1], &[Str]),
    method("getaccount", &[1], &[Str]),
    method("getaccountaddress", &[1], &[Str]),
    method("getaddressesbyaccount", &[1], &[Str]),
    method("getbalance", &[0, 1, 2, 3], &[Str, Int, Bool]),
    method("getnewaddress", &[0, 1], &[Str]),
    method("getrawchangeaddress", &[0], &[]),
    method("getreceivedbyaccount", &[1, 2], &[Str, Int]),
    method("getreceivedbyaddress", &[1, 2], &[Str, Int]),
    method("gettransaction", &[1, 2], &[Str, Bool]),
    method("getunconfirmedbalance", &[0], &[]),
    method("getwalletinfo", &[0], &[]),
    method("importaddress", &[1, 2, 3, 4], &[Str, Str, Bool, Bool]),
    method("importprivkey", &[1, 2, 3], &[Str, Str, Bool]),
    method("importpubkey", &[1, 2, 3], &[Str, Str, Bool]),
    method("importwallet", &[1], &[Str]),
    method("keypoolrefill", &[0, 1], &[Int]),
    method("listaccounts", &[0, 1, 2], &[Int, Bool]),
    method("listaddressgroupings", &[0], &[]),
    method("listlockunspent", &[0], &[]),
    method("listreceivedbyaccount", &[0, 1, 2, 3], &[Int, Bool, Bool]),
    method("listreceivedbyaddress", &[0, 1, 2, 3], &[Int, Bool, Bool]),
    method("listsinceblock", &[0, 1, 2, 3], &[Str, Int, Bool]),
    method("listtransactions", &[0, 1, 2, 3, 4], &[Str, Int, Int, Bool]),
    method("listunspent", &[0, 1, 2, 3], &[Int, Int, Json]),
    method("lockunspent", &[2], &[Bool, Json]),
    method("move", &[3, 4, 5], &[Str, Str, Float, Int, Str]),
    method("sendfrom", &[3, 4, 5, 6], &[Str, Str, Float, Int, Str, Str]),
    method("sendmany", &[2, 3, 4, 5], &[Str, Json, Int, Str, Json]),
    method("sendtoaddress", &[2, 3, 4, 5], &[Str, Float, Str, Str, Bool]),
    method("setaccount", &[2], &[Str, Str]),
    method("settxfee", &[1], &[Float]),
    method("signmessage", &[2], &[Str, Str]),
    method("help", &[0, 1], &[Str]),
];

/// Look up a method by name.
pub fn lookup(name: &str) -> Option<&'static RpcMethod> {
    METHODS.iter().find(|m| m.name == name)
}

/// Whether the console exposes `name`.
pub fn is_supported(name: &str) -> bool {
    lookup(name).is_some()
}
