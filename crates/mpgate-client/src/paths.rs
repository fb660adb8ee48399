//! Upstream path constants, one per platform operation.
//!
//! Paths are relative to the configured API domain; the access token is
//! appended as a query parameter by the transport.

// ── Menus ────────────────────────────────────────────────────
pub const MENU_CREATE: &str = "/cgi-bin/menu/create";
pub const MENU_GET: &str = "/cgi-bin/menu/get";
pub const MENU_DELETE: &str = "/cgi-bin/menu/delete";
pub const MENU_ADD_CONDITIONAL: &str = "/cgi-bin/menu/addconditional";
pub const MENU_DEL_CONDITIONAL: &str = "/cgi-bin/menu/delconditional";
pub const MENU_TRY_MATCH: &str = "/cgi-bin/menu/trymatch";
pub const SELF_MENU_INFO: &str = "/cgi-bin/get_current_selfmenu_info";

// ── QR codes and short keys ──────────────────────────────────
pub const QRCODE_CREATE: &str = "/cgi-bin/qrcode/create";
pub const SHORTEN_GEN: &str = "/cgi-bin/shorten/gen";
pub const SHORTEN_FETCH: &str = "/cgi-bin/shorten/fetch";

// ── Members ──────────────────────────────────────────────────
pub const MEMBER_LIST: &str = "/cgi-bin/user/get";
pub const MEMBER_INFO: &str = "/cgi-bin/user/info";
pub const MEMBER_BATCH_INFO: &str = "/cgi-bin/user/info/batchget";
pub const MEMBER_UPDATE_REMARK: &str = "/cgi-bin/user/info/updateremark";
pub const MEMBER_TAG_IDS: &str = "/cgi-bin/tags/getidlist";

// ── Tags ─────────────────────────────────────────────────────
pub const TAG_CREATE: &str = "/cgi-bin/tags/create";
pub const TAG_LIST: &str = "/cgi-bin/tags/get";
pub const TAG_UPDATE: &str = "/cgi-bin/tags/update";
pub const TAG_DELETE: &str = "/cgi-bin/tags/delete";
pub const TAG_MEMBERS: &str = "/cgi-bin/user/tag/get";
pub const TAG_BATCH_TAGGING: &str = "/cgi-bin/tags/members/batchtagging";
pub const TAG_BATCH_UNTAGGING: &str = "/cgi-bin/tags/members/batchuntagging";

// ── Blacklist ────────────────────────────────────────────────
pub const BLACKLIST_GET: &str = "/cgi-bin/tags/members/getblacklist";
pub const BLACKLIST_BATCH_BLOCK: &str = "/cgi-bin/tags/members/batchblacklist";
pub const BLACKLIST_BATCH_UNBLOCK: &str = "/cgi-bin/tags/members/batchunblacklist";

// ── Permanent materials ──────────────────────────────────────
pub const MATERIAL_COUNT: &str = "/cgi-bin/material/get_materialcount";
pub const MATERIAL_BATCH_GET: &str = "/cgi-bin/material/batchget_material";
pub const MATERIAL_DELETE: &str = "/cgi-bin/material/del_material";

// ── Customer service accounts and sessions ───────────────────
pub const KF_ACCOUNT_ADD: &str = "/customservice/kfaccount/add";
pub const KF_ACCOUNT_UPDATE: &str = "/customservice/kfaccount/update";
pub const KF_ACCOUNT_DEL: &str = "/customservice/kfaccount/del";
pub const KF_INVITE_WORKER: &str = "/customservice/kfaccount/inviteworker";
pub const KF_LIST: &str = "/cgi-bin/customservice/getkflist";
pub const KF_ONLINE_LIST: &str = "/cgi-bin/customservice/getonlinekflist";
pub const KF_SEND_MESSAGE: &str = "/cgi-bin/message/custom/send";
pub const KF_TYPING: &str = "/cgi-bin/message/custom/typing";
pub const KF_MSG_RECORDS: &str = "/customservice/msgrecord/getmsglist";
pub const KF_SESSION_CREATE: &str = "/customservice/kfsession/create";
pub const KF_SESSION_CLOSE: &str = "/customservice/kfsession/close";
pub const KF_SESSION_STATUS: &str = "/customservice/kfsession/getsession";
pub const KF_SESSION_LIST: &str = "/customservice/kfsession/getsessionlist";
pub const KF_SESSION_WAIT_CASE: &str = "/customservice/kfsession/getwaitcase";

// ── Template messages ────────────────────────────────────────
pub const TEMPLATE_GET_INDUSTRY: &str = "/cgi-bin/template/get_industry";
pub const TEMPLATE_SET_INDUSTRY: &str = "/cgi-bin/template/api_set_industry";
pub const TEMPLATE_GET_ALL_PRIVATE: &str = "/cgi-bin/template/get_all_private_template";
pub const TEMPLATE_GET_ID: &str = "/cgi-bin/template/api_add_template";
pub const TEMPLATE_DELETE: &str = "/cgi-bin/template/del_private_template";
pub const TEMPLATE_SEND: &str = "/cgi-bin/message/template/send";
pub const TEMPLATE_BLOCKED_MSG: &str = "/wxa/sec/queryblocktmplmsg";

// ── Subscription messages ────────────────────────────────────
pub const SUBSCRIBE_TPL_ADD: &str = "/wxaapi/newtmpl/addtemplate";
pub const SUBSCRIBE_TPL_DEL: &str = "/wxaapi/newtmpl/deltemplate";
pub const SUBSCRIBE_CATEGORY: &str = "/wxaapi/newtmpl/getcategory";
pub const SUBSCRIBE_PUB_TPL_KEYWORDS: &str = "/wxaapi/newtmpl/getpubtemplatekeywords";
pub const SUBSCRIBE_PUB_TPL_TITLES: &str = "/wxaapi/newtmpl/getpubtemplatetitles";
pub const SUBSCRIBE_PRIVATE_TPL: &str = "/wxaapi/newtmpl/gettemplate";
pub const SUBSCRIBE_SEND: &str = "/cgi-bin/message/subscribe/bizsend";
