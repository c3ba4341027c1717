//! GraphQL documents sent to the portal service.
//!
//! Selections cover exactly the fields the guards and view models read.

pub const GET_VIEWER: &str = r#"
query GetUser($userInput: UserInput) {
  userMeta(userInput: $userInput) {
    uid
    role
  }
}
"#;

pub const GET_EVENT: &str = r#"
query Event($eventid: String!) {
  event(eventid: $eventid) {
    _id
    code
    name
    poc
    clubid
    collabclubs
    clubCategory
    datetimeperiod
    location
    budget {
      amount
      description
      advance
      billno
      amountUsed
    }
    status {
      state
      room
      budget
      lastUpdatedTime
      lastUpdatedBy
      submissionTime
      ccApprover
      slcApprover
      deletedBy
    }
    eventReportSubmitted
  }
}
"#;

pub const GET_EVENT_REPORT: &str = r#"
query EventReport($eventid: String!) {
  eventReport(eventid: $eventid) {
    eventid
    summary
    attendance
    externalAttendance
    prizes
    prizesBreakdown
    winners
    photosLink
    feedbackCc
    feedbackCollege
    submittedBy
    submittedTime
  }
}
"#;

pub const GET_EVENT_BILLS_STATUS: &str = r#"
query EventBillsStatus($eventid: String!) {
  eventBills(eventid: $eventid) {
    state
    sloComment
    updatedTime
    filename
    submittedTime
  }
}
"#;

pub const GET_CLASHING_EVENTS: &str = r#"
query ClashingEvents($eventId: String!, $filterByLocation: Boolean!) {
  clashingEvents(id: $eventId, filterByLocation: $filterByLocation) {
    _id
  }
}
"#;

pub const GET_EVENT_ID_FROM_CODE: &str = r#"
query EventId($code: String!) {
  eventid(code: $code)
}
"#;

pub const GET_CLUB: &str = r#"
query Club($clubInput: SimpleClubInput!) {
  club(clubInput: $clubInput) {
    _id
    cid
    code
    name
    category
    email
    tagline
    state
  }
}
"#;

pub const GET_MEMBER: &str = r#"
query Member($memberInput: SimpleMemberInput!) {
  member(memberInput: $memberInput) {
    _id
    uid
    cid
    poc
    roles {
      rid
      name
      startYear
      endYear
      approved
      rejected
      deleted
    }
  }
}
"#;

pub const GET_USER_PROFILE: &str = r#"
query GetUserProfile($userInput: UserInput!) {
  userMeta(userInput: $userInput) {
    uid
    role
    img
  }
  userProfile(userInput: $userInput) {
    firstName
    lastName
    email
  }
}
"#;

pub const GET_MEMBERSHIPS: &str = r#"
query MemberRoles($uid: String!) {
  memberRoles(uid: $uid) {
    _id
    uid
    cid
    poc
    roles {
      rid
      name
      startYear
      endYear
      deleted
    }
  }
}
"#;

pub const GET_MEMBERS: &str = r#"
query Members($clubInput: SimpleClubInput!) {
  members(clubInput: $clubInput) {
    _id
    cid
    uid
    poc
    roles {
      name
      startYear
      endYear
      approved
      rejected
      deleted
    }
  }
}
"#;

pub const GET_HOLIDAY: &str = r#"
query GetHoliday($id: String!) {
  holiday(id: $id) {
    _id
    name
    date
    description
  }
}
"#;

pub const GET_FILE: &str = r#"
query GetFile($fileId: String!) {
  storagefile(fileId: $fileId) {
    _id
    title
    filename
    filetype
    latestVersion
    modifiedTime
  }
}
"#;
